//! Benchmark for decoding, reading and re-encoding asset payloads.
//!
//! Synthesizes a fleet of lights, batteries and consoles, some of whose
//! attributes have drifted from their declared types, and measures the full
//! ingest path.
//!
//! Usage: `bench-assets [COUNT]` (default 10000). Set `RUST_LOG=asset_model=debug`
//! to see non-conforming reads.

use std::time::Instant;

use asset_model::{
    AssetKind, Console, ElectricityStorage, Light, decode_asset, encode_asset, validate_asset,
};
use serde_json::json;

const DEFAULT_COUNT: usize = 10_000;

/// Builds the JSON payload of the `i`-th asset. Every seventh asset carries a
/// drifted value.
fn payload(i: usize) -> serde_json::Value {
    let drifted = i % 7 == 0;
    let brightness = if drifted { json!("50") } else { json!(i % 101) };
    let charge_cycles = if drifted { json!(12.5) } else { json!(i) };
    let platform = if drifted { json!("") } else { json!("Android 14") };
    match i % 3 {
        0 => json!({
            "name": format!("light-{i}"),
            "type": "Light",
            "attributes": {
                "onOff": { "value": i % 2 == 0, "meta": { "unitType": "ON_OFF" } },
                "brightness": { "value": brightness },
                "colourTemperature": { "value": 2700 + (i % 4) * 500 },
                "manufacturer": { "value": "Acme" }
            }
        }),
        1 => json!({
            "name": format!("battery-{i}"),
            "type": "Electricity storage",
            "attributes": {
                "energyCapacity": { "value": 13.5, "meta": { "unitType": "ENERGY_KILOWATT_HOUR", "readOnly": true } },
                "energyInPercentage": { "value": i % 101 },
                "chargeCycles": { "value": charge_cycles },
                "powerSetpoint": { "value": null },
                "status": { "value": "idle" }
            }
        }),
        _ => json!({
            "name": format!("console-{i}"),
            "type": "Console",
            "attributes": {
                "consoleName": { "value": format!("kiosk-{i}") },
                "consolePlatform": { "value": platform },
                "consoleProviders": { "value": {
                    "push": { "version": "fcm", "enabled": true },
                    "geofence": { "version": "ORConsole", "requiresPermission": true }
                } }
            }
        }),
    }
}

#[derive(Debug, Default)]
struct Reads {
    present: usize,
    absent: usize,
    invalid_assets: usize,
}

impl Reads {
    fn count<T>(&mut self, value: Option<T>) {
        match value {
            Some(_) => self.present += 1,
            None => self.absent += 1,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let count = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<usize>()?,
        None => DEFAULT_COUNT,
    };

    println!("Synthesizing {} asset payloads", count);
    let synth_start = Instant::now();
    let payloads: Vec<Vec<u8>> = (0..count)
        .map(|i| serde_json::to_vec(&payload(i)))
        .collect::<Result<_, _>>()?;
    let input_bytes: usize = payloads.iter().map(Vec::len).sum();
    println!("  {} bytes in {:?}", input_bytes, synth_start.elapsed());

    // Decode
    let decode_start = Instant::now();
    let assets = payloads
        .iter()
        .map(|bytes| decode_asset(bytes))
        .collect::<Result<Vec<_>, _>>()?;
    let decode_time = decode_start.elapsed();
    println!("\nDecoded {} assets in {:?}", assets.len(), decode_time);
    println!(
        "  Throughput: {:.2} MB/s",
        (input_bytes as f64 / 1_000_000.0) / decode_time.as_secs_f64()
    );

    // Typed reads through the façades
    let read_start = Instant::now();
    let mut reads = Reads::default();
    let mut assets_out = Vec::with_capacity(assets.len());
    for asset in assets {
        let asset = match Light::from_asset(asset) {
            Ok(light) => {
                reads.count(light.on_off());
                reads.count(light.brightness());
                reads.count(light.colour_temperature());
                if validate_asset(&light).is_err() {
                    reads.invalid_assets += 1;
                }
                assets_out.push(light.into_asset());
                continue;
            }
            Err(asset) => asset,
        };
        let asset = match ElectricityStorage::from_asset(asset) {
            Ok(battery) => {
                reads.count(battery.energy_capacity());
                reads.count(battery.energy_in_percentage());
                reads.count(battery.charge_cycles());
                reads.count(battery.power_setpoint());
                if validate_asset(&battery).is_err() {
                    reads.invalid_assets += 1;
                }
                assets_out.push(battery.into_asset());
                continue;
            }
            Err(asset) => asset,
        };
        match Console::from_asset(asset) {
            Ok(console) => {
                reads.count(console.console_name());
                reads.count(console.console_platform());
                reads.count(console.console_providers());
                if validate_asset(&console).is_err() {
                    reads.invalid_assets += 1;
                }
                assets_out.push(console.into_asset());
            }
            Err(asset) => assets_out.push(asset),
        }
    }
    let read_time = read_start.elapsed();
    println!(
        "\nTyped reads in {:?}: {} present, {} absent, {} assets failing validation",
        read_time, reads.present, reads.absent, reads.invalid_assets
    );

    // Encode
    let encode_start = Instant::now();
    let mut output_bytes = 0;
    for asset in &assets_out {
        output_bytes += encode_asset(asset)?.len();
    }
    let encode_time = encode_start.elapsed();
    println!("\nEncoded {} bytes in {:?}", output_bytes, encode_time);
    println!(
        "  Throughput: {:.2} MB/s",
        (output_bytes as f64 / 1_000_000.0) / encode_time.as_secs_f64()
    );

    Ok(())
}
