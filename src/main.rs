//! Demo: one verification run against mock platform providers

use presence::{
    AccessPointConfig, GeoCoordinate, MockPositionProvider, MockSignalScanner, ObservedSignal,
    VerificationOrchestrator, Zone,
};

fn main() {
    let zone = Zone {
        id: "room-204".to_string(),
        building_name: "Science Block".to_string(),
        floor_number: 2,
        center: GeoCoordinate::new(13.067439, 80.237617),
        width_m: 10.0,
        length_m: 12.0,
        assigned_access_point: Some("aa:bb:cc:dd:ee:ff".to_string()),
    };

    let access_point = AccessPointConfig {
        bssid: "aa:bb:cc:dd:ee:ff".to_string(),
        ssid: "SCI-204".to_string(),
        floor_number: 2,
        detection_threshold_dbm: -85,
        same_floor_min_dbm: -55,
        different_floor_max_dbm: -75,
    };

    // Scripted device: the access point is visible at moderate strength and
    // a medium-accuracy fix lands inside the zone
    let mut provider = MockPositionProvider::new();
    provider.add_fix(13.067440, 80.237620, 18.0);
    let mut scanner = MockSignalScanner::new();
    scanner.set_environment(vec![
        ObservedSignal::new("11:22:33:44:55:66", "campus-guest", -70),
        ObservedSignal::new("aa:bb:cc:dd:ee:ff", "SCI-204", -62),
    ]);

    let mut orchestrator =
        VerificationOrchestrator::new(Box::new(provider), Box::new(scanner));
    let result = orchestrator.verify(&zone, Some(&access_point));

    println!(
        "verified: {} ({:?} via {:?})",
        result.verified, result.reason, result.method
    );
    println!("floor:    {}", result.floor_reason);
    println!("--- evidence ---");
    println!("{}", result.trace.to_report());

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("--- record ---\n{}", json),
        Err(e) => eprintln!("Failed to serialize result: {}", e),
    }
}
