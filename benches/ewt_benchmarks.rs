//! Benchmarks for the config processing path
//!
//! Loading, substitution and chip detection run on every invocation before
//! compilation starts.

use criterion::{Criterion, criterion_group, criterion_main};
use ewt_gen::models::detect_chip_family;
use ewt_gen::yaml::{Substitutions, load_config_str};
use std::hint::black_box;

fn device_yaml(sensors: usize) -> String {
    let mut yaml = String::from(
        r#"substitutions:
  device_name: bench-device
  friendly_name: Bench Device
  update_interval: 60s

esphome:
  name: ${device_name}
  friendly_name: ${friendly_name}

esp32:
  board: esp32-s3-devkitc-1
  variant: esp32s3

wifi:
  ssid: !secret wifi_ssid
  password: !secret wifi_password

sensor:
"#,
    );

    for i in 0..sensors {
        yaml.push_str(&format!(
            "  - platform: template\n    name: ${{friendly_name}} Sensor {i}\n    update_interval: ${{update_interval}}\n    lambda: !lambda |-\n      return {i}.0;\n"
        ));
    }

    yaml
}

fn benchmark_load_config(c: &mut Criterion) {
    let yaml = device_yaml(100);

    c.bench_function("load_config_100_sensors", |b| {
        b.iter(|| load_config_str(black_box(&yaml)).unwrap())
    });
}

fn benchmark_expand_substitutions(c: &mut Criterion) {
    let config = load_config_str(&device_yaml(100)).unwrap();
    let substitutions = Substitutions::from_config(&config);

    c.bench_function("expand_config_100_sensors", |b| {
        b.iter(|| substitutions.expand_config(black_box(&config)))
    });
}

fn benchmark_detect_chip_family(c: &mut Criterion) {
    let config = load_config_str(&device_yaml(10)).unwrap();

    c.bench_function("detect_chip_family", |b| {
        b.iter(|| detect_chip_family(black_box(&config)))
    });
}

criterion_group!(
    benches,
    benchmark_load_config,
    benchmark_expand_substitutions,
    benchmark_detect_chip_family
);
criterion_main!(benches);
