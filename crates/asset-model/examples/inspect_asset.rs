//! Simple inspector for asset JSON files.

use std::fs;

use asset_model::asset::{asset_descriptor, AssetKind, Console, ElectricityStorage, Light};
use asset_model::model::{format_id, DescribeAttribute, Value};
use asset_model::{decode_asset, AttributeSchema, HasAttributes};

fn format_value(v: &Value) -> String {
    match v {
        Value::Text(s) => {
            let preview: String = s.chars().take(80).collect();
            if s.chars().count() > 80 {
                format!("\"{}...\"", preview)
            } else {
                format!("\"{}\"", preview)
            }
        }
        Value::Integer(i) => format!("{}", i),
        Value::Number(n) => format!("{:.6}", n),
        Value::Bool(b) => format!("{}", b),
        Value::Array(items) => format!("ARRAY[{}]", items.len()),
        Value::Object(entries) => format!("OBJECT{{{}}}", entries.len()),
    }
}

fn vocabulary(kind: &str) -> Vec<&'static dyn DescribeAttribute> {
    match kind {
        "Console" => Console::vocabulary(),
        "Light" => Light::vocabulary(),
        "Electricity storage" => ElectricityStorage::vocabulary(),
        _ => asset_model::asset::vocabulary(),
    }
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "asset.json".to_string());

    println!("Reading: {}", path);

    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes", data.len());

    let asset = decode_asset(&data).expect("Failed to decode");
    let kind = asset.descriptor();

    println!("\n=== Asset Info ===");
    println!("ID: {}", format_id(asset.id()));
    println!("Name: {}", asset.name());
    println!("Type: {} (icon {})", kind.name(), kind.icon());
    if let Some(colour) = asset_descriptor(kind.name()).and_then(|d| d.colour()) {
        println!("Colour: #{}", colour);
    }

    let schema = AttributeSchema::from_vocabulary(vocabulary(kind.name()))
        .expect("Inconsistent vocabulary");

    println!("\n=== Attributes ({}) ===", asset.attributes().len());
    for (name, attribute) in asset.attributes().sorted() {
        let value = attribute.value().map(format_value).unwrap_or_else(|| "-".to_string());
        let status = match (schema.get(name), attribute.value()) {
            (None, _) => "unknown".to_string(),
            (Some(_), None) => "absent".to_string(),
            (Some(descriptor), Some(raw)) => match descriptor.check(raw) {
                None => format!("ok ({})", descriptor.value_type_name()),
                Some(reason) => format!("INVALID ({}: {})", descriptor.value_type_name(), reason),
            },
        };
        println!("  {:<28} {:<40} {}", name, value, status);
        for item in attribute.meta().iter() {
            println!("      meta {} = {}", item.name(), format_value(item.value()));
        }
    }
}
