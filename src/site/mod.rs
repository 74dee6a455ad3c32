//! Static site generation for ESP Web Tools

pub mod factory;
pub mod generator;
pub mod html;
pub mod template;

pub use factory::create_factory_yaml;
pub use generator::{GeneratedSite, SiteOptions, generate_site};
pub use template::{TemplateContext, index_template, render_template};
