use serde_json::Value;

use super::support;
use crate::nic::hex_bytes;

#[test]
fn hex_bytes_is_space_separated_lowercase() {
    assert_eq!(hex_bytes(&[]), "");
    assert_eq!(hex_bytes(&[0, 255, 16]), "00 ff 10");
}

#[test]
fn text_report_lists_ports_then_queues() {
    let sim = support::sim_with_ports(&[(5, 7)]);
    let text = sim.results().render_text();

    let zeros = hex_bytes(&[0u8; 64]);
    assert_eq!(text, format!("LOCAL_DRAM\n5 7: {zeros}\n\nRQ:\n\nTQ:\n"));
}

#[test]
fn results_serialize_to_json() {
    let sim = support::sim_with_ports(&[(5, 7)]);
    let value = serde_json::to_value(sim.results()).expect("serialize results");

    assert_eq!(value["ports"][0]["src_port"], Value::from(5));
    assert_eq!(value["ports"][0]["dst_port"], Value::from(7));
    assert!(value["rq"].as_array().expect("rq array").is_empty());
    assert!(value["tq"].as_array().expect("tq array").is_empty());
}
