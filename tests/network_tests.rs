use tracklayer::{
    network::{Error, railway_cost},
    prelude::*,
    shared::path_length,
};

const A: Coordinate = Coordinate::new(47.50, 19.04);
const B: Coordinate = Coordinate::new(47.51, 19.05);
const C: Coordinate = Coordinate::new(47.52, 19.04);

fn station(network: &mut Network, name: &str, position: Coordinate) -> Id {
    network
        .add_building(BuildingSpec::new(BuildingKind::Station, name, position))
        .unwrap()
}

#[test]
fn add_building_debits_funds_test() {
    let mut network = Network::default();
    let id = station(&mut network, "A", A);
    assert_eq!(network.money(), 1_000_000 - 25_000);
    assert_eq!(network.total_spent(), 25_000);

    let building = network.building(&id).unwrap();
    assert_eq!(building.kind, BuildingKind::Station);
    assert_eq!(building.level, 1);
    assert_eq!(building.position, A);
}

#[test]
fn add_building_scales_with_level_test() {
    let mut network = Network::default();
    network
        .add_building(BuildingSpec::new(BuildingKind::City, "Town", A).with_level(2))
        .unwrap();
    assert_eq!(network.money(), 1_000_000 - 120_000);
}

#[test]
fn add_building_insufficient_funds_test() {
    let mut network = Network::default().with_money(10_000);
    let result = network.add_building(BuildingSpec::new(BuildingKind::Factory, "F", A));
    assert_eq!(
        result,
        Err(Error::InsufficientFunds {
            required: 40_000,
            available: 10_000
        })
    );
    assert_eq!(network.money(), 10_000);
    assert_eq!(network.total_spent(), 0);
    assert!(network.buildings().is_empty());
}

#[test]
fn add_straight_railway_test() {
    let mut network = Network::default();
    let a = station(&mut network, "A", A);
    let b = station(&mut network, "B", B);
    let money = network.money();

    let id = network
        .add_railway(RailwaySpec::new(a.clone(), b.clone(), vec![A, B], RailwayKind::Cargo))
        .unwrap();
    let railway = network.railway(&id).unwrap();
    assert_eq!(railway.path, vec![A, B]);
    assert!((railway.length_km - A.distance(&B).as_kilometers()).abs() < 1e-9);
    let cost = railway_cost(A.distance(&B), RailwayKind::Cargo);
    assert_eq!(cost, (railway.length_km * 40_000.0).round() as i64);
    assert_eq!(railway.cost, cost);
    assert_eq!(network.money(), money - cost);
}

#[test]
fn add_curved_railway_is_smoothed_test() {
    let mut network = Network::default();
    let a = station(&mut network, "A", A);
    let c = station(&mut network, "C", C);
    let id = network
        .add_railway(RailwaySpec::new(a, c, vec![A, B, C], RailwayKind::Passenger))
        .unwrap();

    let railway = network.railway(&id).unwrap();
    let segments = network.config().smoothing_segments;
    assert_eq!(railway.path.len(), 2 * segments + 1);
    assert_eq!(railway.path.first(), Some(&A));
    // Stored length always matches the stored geometry
    assert!((railway.length_km - path_length(&railway.path).as_kilometers()).abs() < 1e-6);
    assert!(railway.cost >= MINIMUM_COST);
}

const MINIMUM_COST: i64 = tracklayer::network::MINIMUM_RAILWAY_COST;

#[test]
fn add_railway_rejections_test() {
    let mut network = Network::default();
    let a = station(&mut network, "A", A);
    let b = station(&mut network, "B", B);
    let money = network.money();

    assert_eq!(
        network.add_railway(RailwaySpec::new(a.clone(), a.clone(), vec![A, A], RailwayKind::Cargo)),
        Err(Error::SameEndpoints)
    );
    assert_eq!(
        network.add_railway(RailwaySpec::new(a.clone(), b.clone(), vec![A], RailwayKind::Cargo)),
        Err(Error::InvalidPath)
    );
    assert!(matches!(
        network.add_railway(RailwaySpec::new(a.clone(), "nowhere", vec![A, B], RailwayKind::Cargo)),
        Err(Error::UnknownStop(_))
    ));
    assert!(network.railways().is_empty());
    assert_eq!(network.money(), money);
}

#[test]
fn add_railway_insufficient_funds_test() {
    let mut network = Network::default();
    let a = station(&mut network, "A", A);
    let b = station(&mut network, "B", B);
    let mut network = network.with_money(5_000);
    let result = network.add_railway(RailwaySpec::new(a, b, vec![A, B], RailwayKind::Cargo));
    assert!(matches!(result, Err(Error::InsufficientFunds { .. })));
    assert!(network.railways().is_empty());
    assert_eq!(network.money(), 5_000);
}

#[test]
fn remove_building_cascades_test() {
    let mut network = Network::default();
    let a = station(&mut network, "A", A);
    let b = station(&mut network, "B", B);
    let c = station(&mut network, "C", C);
    network
        .add_railway(RailwaySpec::new(a.clone(), b.clone(), vec![A, B], RailwayKind::Cargo))
        .unwrap();
    let kept = network
        .add_railway(RailwaySpec::new(b.clone(), c.clone(), vec![B, C], RailwayKind::Cargo))
        .unwrap();
    network.select_building(Some(a.clone()));

    network.remove_building(&a);
    assert!(network.building(&a).is_none());
    assert_eq!(network.railways().len(), 1);
    assert_eq!(network.railways()[0].id, kept);
    assert!(network.selected_building().is_none());

    // Unknown ids are a no-op
    network.remove_building("missing");
    assert_eq!(network.buildings().len(), 2);
}

#[test]
fn remove_railway_idles_trains_test() {
    let mut network = Network::default();
    let a = station(&mut network, "A", A);
    let b = station(&mut network, "B", B);
    let railway = network
        .add_railway(RailwaySpec::new(a.clone(), b.clone(), vec![A, B], RailwayKind::Cargo))
        .unwrap();
    let train = network
        .add_train(TrainSpec::new("T1", TrainKind::Cargo, A))
        .unwrap();
    network.start_train(&train, vec![a, b]).unwrap();
    network.select_railway(Some(railway.clone()));

    network.remove_railway(&railway);
    let train = network.train(&train).unwrap();
    assert_eq!(train.status, TrainStatus::Idle);
    assert!(train.current_railway.is_none());
    assert!(network.selected_railway().is_none());
}

#[test]
fn split_railway_with_junction_test() {
    let mut network = Network::default();
    let a = station(&mut network, "A", A);
    let b = station(&mut network, "B", B);
    let original = network
        .add_railway(RailwaySpec::new(a.clone(), b.clone(), vec![A, B], RailwayKind::Passenger))
        .unwrap();
    let original_length = network.railway(&original).unwrap().length_km;
    let money = network.money();

    let point = A.lerp(&B, 0.4);
    let junction = network
        .add_junction(
            JunctionSpec::new("J1", point),
            Some(Split {
                railway: original.clone(),
                point,
                segment_index: 0,
            }),
        )
        .unwrap();

    assert!(network.railway(&original).is_none());
    assert_eq!(network.railways().len(), 2);
    assert_eq!(network.money(), money);

    let first = network
        .railways()
        .iter()
        .find(|railway| railway.from == a)
        .unwrap();
    let second = network
        .railways()
        .iter()
        .find(|railway| railway.to == b)
        .unwrap();
    assert_eq!(first.to, junction);
    assert_eq!(second.from, junction);
    assert_eq!(first.path, vec![A, point]);
    assert_eq!(second.path, vec![point, B]);
    assert_eq!(first.cost, 0);
    assert_eq!(second.cost, 0);
    assert_eq!(first.kind, RailwayKind::Passenger);
    assert!((first.length_km + second.length_km - original_length).abs() < 1e-6);
    assert!(network.stop(&junction).unwrap().is_junction());
}

#[test]
fn split_railway_idles_trains_on_it_test() {
    let mut network = Network::default();
    let a = station(&mut network, "A", A);
    let b = station(&mut network, "B", B);
    let original = network
        .add_railway(RailwaySpec::new(a.clone(), b.clone(), vec![A, B], RailwayKind::Cargo))
        .unwrap();
    let train = network
        .add_train(TrainSpec::new("T1", TrainKind::Cargo, A))
        .unwrap();
    network.start_train(&train, vec![a, b]).unwrap();
    network.update_trains(Duration::from_seconds(10.0));
    let position = network.train(&train).unwrap().current_position;

    let point = A.lerp(&B, 0.5);
    network
        .add_junction(
            JunctionSpec::new("J1", point),
            Some(Split {
                railway: original,
                point,
                segment_index: 0,
            }),
        )
        .unwrap();

    let state = network.train(&train).unwrap();
    assert_eq!(state.status, TrainStatus::Idle);
    assert!(state.current_railway.is_none());
    assert_eq!(state.current_position, position);
    assert_eq!(network.update_trains(Duration::from_seconds(10.0)), 0);
    assert_eq!(network.train(&train).unwrap().current_position, position);
}

#[test]
fn split_curved_railway_preserves_length_test() {
    let mut network = Network::default();
    let a = station(&mut network, "A", A);
    let c = station(&mut network, "C", C);
    let original = network
        .add_railway(RailwaySpec::new(a, c, vec![A, B, C], RailwayKind::Cargo))
        .unwrap();
    let railway = network.railway(&original).unwrap().clone();
    let segment_index = railway.path.len() / 3;
    let point = railway.path[segment_index].lerp(&railway.path[segment_index + 1], 0.5);

    network
        .add_junction(
            JunctionSpec::new("J", point),
            Some(Split {
                railway: original,
                point,
                segment_index,
            }),
        )
        .unwrap();
    let total: f64 = network.railways().iter().map(|railway| railway.length_km).sum();
    // Re-smoothing an already dense path only moves it slightly
    assert!((total - railway.length_km).abs() / railway.length_km < 0.01);
    for railway in network.railways() {
        assert!((railway.length_km - path_length(&railway.path).as_kilometers()).abs() < 1e-6);
    }
}

#[test]
fn split_rejections_leave_state_untouched_test() {
    let mut network = Network::default();
    let a = station(&mut network, "A", A);
    let b = station(&mut network, "B", B);
    let railway = network
        .add_railway(RailwaySpec::new(a, b, vec![A, B], RailwayKind::Cargo))
        .unwrap();

    let result = network.add_junction(
        JunctionSpec::new("J", A),
        Some(Split {
            railway: railway.clone(),
            point: A,
            segment_index: 1,
        }),
    );
    assert_eq!(result, Err(Error::InvalidSplit { segment_index: 1 }));

    let result = network.add_junction(
        JunctionSpec::new("J", A),
        Some(Split {
            railway: "missing".into(),
            point: A,
            segment_index: 0,
        }),
    );
    assert!(matches!(result, Err(Error::UnknownRailway(_))));
    assert!(network.junctions().is_empty());
    assert_eq!(network.railways().len(), 1);
}

#[test]
fn remove_junction_disconnects_line_test() {
    let mut network = Network::default();
    let a = station(&mut network, "A", A);
    let b = station(&mut network, "B", B);
    let railway = network
        .add_railway(RailwaySpec::new(a, b, vec![A, B], RailwayKind::Cargo))
        .unwrap();
    let point = A.lerp(&B, 0.5);
    let junction = network
        .add_junction(
            JunctionSpec::new("J", point),
            Some(Split {
                railway,
                point,
                segment_index: 0,
            }),
        )
        .unwrap();

    network.remove_junction(&junction);
    assert!(network.junctions().is_empty());
    assert!(network.railways().is_empty());
}

#[test]
fn standalone_junction_test() {
    let mut network = Network::default();
    let money = network.money();
    let id = network.add_junction(JunctionSpec::new("J", C), None).unwrap();
    assert_eq!(network.junction(&id).unwrap().position, C);
    assert_eq!(network.money(), money);
}

#[test]
fn nearest_railway_point_test() {
    let mut network = Network::default();
    let a = station(&mut network, "A", A);
    let b = station(&mut network, "B", B);
    let c = station(&mut network, "C", C);
    let ab = network
        .add_railway(RailwaySpec::new(a, b.clone(), vec![A, B], RailwayKind::Cargo))
        .unwrap();
    network
        .add_railway(RailwaySpec::new(b, c, vec![B, C], RailwayKind::Cargo))
        .unwrap();

    let on_line = A.lerp(&B, 0.3);
    let found = network
        .nearest_railway_point(&on_line, Distance::from_meters(100.0))
        .unwrap();
    assert_eq!(found.railway, ab);
    assert_eq!(found.segment_index, 0);
    assert!(found.distance.as_meters() < 1e-6);

    let far = Coordinate::new(47.60, 19.20);
    assert!(
        network
            .nearest_railway_point(&far, Distance::from_meters(100.0))
            .is_none()
    );
}

#[test]
fn nearest_point_prefers_closest_railway_test() {
    let mut network = Network::default();
    let a = station(&mut network, "A", A);
    let b = station(&mut network, "B", B);
    let c = station(&mut network, "C", C);
    network
        .add_railway(RailwaySpec::new(a, b.clone(), vec![A, B], RailwayKind::Cargo))
        .unwrap();
    let bc = network
        .add_railway(RailwaySpec::new(b, c, vec![B, C], RailwayKind::Cargo))
        .unwrap();

    let near_bc = B.lerp(&C, 0.5);
    let query = Coordinate::new(near_bc.latitude, near_bc.longitude + 0.0002);
    let found = network
        .nearest_railway_point(&query, Distance::from_meters(500.0))
        .unwrap();
    assert_eq!(found.railway, bc);
    assert!(found.distance < Distance::from_meters(20.0));
}

#[test]
fn train_purchase_and_refund_test() {
    let mut network = Network::default();
    let id = network
        .add_train(TrainSpec::new("Cargo 1", TrainKind::Cargo, A))
        .unwrap();
    assert_eq!(network.money(), 800_000);
    assert_eq!(network.total_spent(), 200_000);

    let train = network.train(&id).unwrap();
    assert_eq!(train.status, TrainStatus::Idle);
    assert_eq!(train.speed, 40.0);
    assert_eq!(train.target_speed, 40.0);
    assert_eq!(train.wait_time, 0.0);
    assert!(train.current_railway.is_none());

    let sold = network.remove_train(&id).unwrap();
    assert_eq!(sold.purchase_price, 200_000);
    assert_eq!(network.money(), 1_000_000);
    assert_eq!(network.total_spent(), 0);
    assert!(network.remove_train(&id).is_none());
}

#[test]
fn train_purchase_insufficient_funds_test() {
    let mut network = Network::default().with_money(100_000);
    let result = network.add_train(TrainSpec::new("P", TrainKind::Passenger, A));
    assert!(matches!(result, Err(Error::InsufficientFunds { .. })));
    assert!(network.trains().is_empty());

    let id = network
        .add_train(
            TrainSpec::new("Custom", TrainKind::Passenger, A)
                .with_price(50_000)
                .with_speed(120.0),
        )
        .unwrap();
    assert_eq!(network.train(&id).unwrap().speed, 120.0);
    assert_eq!(network.money(), 50_000);
}

#[test]
fn statistics_test() {
    let mut network = Network::default();
    let a = station(&mut network, "A", A);
    let b = station(&mut network, "B", B);
    network
        .add_building(BuildingSpec::new(BuildingKind::Warehouse, "W", C))
        .unwrap();
    network
        .add_railway(RailwaySpec::new(a, b, vec![A, B], RailwayKind::Cargo))
        .unwrap();
    network
        .add_train(TrainSpec::new("T", TrainKind::Cargo, A))
        .unwrap();

    let stats = network.statistics();
    assert_eq!(stats.buildings, 3);
    assert_eq!(stats.stations, 2);
    assert_eq!(stats.railways, 1);
    assert_eq!(stats.trains, 1);
    assert_eq!(stats.idle_trains, 1);
    assert!((stats.railway_length.as_meters() - A.distance(&B).as_meters()).abs() < 1e-6);
    assert_eq!(stats.money, network.money());
    assert_eq!(stats.total_spent, network.total_spent());
}

#[test]
fn clear_all_test() {
    let mut network = Network::default();
    station(&mut network, "A", A);
    network.clear_all();
    assert!(network.buildings().is_empty());
    assert_eq!(network.money(), 1_000_000);
    assert_eq!(network.total_spent(), 0);
}

#[test]
fn branch_junction_snaps_onto_railway_test() {
    let mut network = Network::default();
    let a = station(&mut network, "A", A);
    let b = station(&mut network, "B", B);
    network
        .add_railway(RailwaySpec::new(a.clone(), b.clone(), vec![A, B], RailwayKind::Cargo))
        .unwrap();

    let on_line = A.lerp(&B, 0.5);
    let click = Coordinate::new(on_line.latitude + 0.0001, on_line.longitude - 0.0001);
    let junction = network.add_branch_junction("Branch", &click).unwrap();

    let position = network.junction(&junction).unwrap().position;
    assert!(position.distance(&on_line).as_meters() < 1.0);
    assert_eq!(network.railways().len(), 2);
    assert!(network.railways().iter().all(|railway| railway.touches(&junction)));

    let far = Coordinate::new(47.60, 19.20);
    assert!(matches!(
        network.add_branch_junction("Nowhere", &far),
        Err(Error::NoRailwayNearby(_))
    ));
    assert_eq!(network.junctions().len(), 1);
}
