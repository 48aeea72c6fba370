use super::*;
use crate::helpers::models::problem::create_unit_transport;

#[test]
fn can_allocate_dense_ids() {
    let mut builder = InstanceBuilder::new(create_unit_transport(3));

    let technician = builder.add_technician(TechnicianBuilder::default().shift(0., 10.).capacity(&[5]).skills([1]));
    let request = builder.add_request(RequestBuilder::default().location(2).time_window(1., 5.).service_time(2.));
    let instance = builder.build().unwrap();

    assert_eq!(technician, 0);
    assert_eq!(request, 2);
    assert_eq!(instance.node_count(), 3);
    assert_eq!(instance.requests(), &[2]);

    let technician = instance.technician(0).unwrap();
    assert_eq!((technician.home, technician.home_end), (0, 1));
    assert_eq!(instance.node(0).kind, NodeKind::Home);
    assert_eq!(instance.node(1).kind, NodeKind::HomeEnd);
    assert_eq!((instance.node(1).time_window.start, instance.node(1).time_window.end), (0., 10.));
    assert!(instance.is_request(2));
    assert!(!instance.is_request(0));
    assert!(!instance.is_request(3));
}

#[test]
fn can_use_independent_allocators() {
    let mut first = IdAllocator::default();
    let mut second = IdAllocator::default();

    assert_eq!((first.next_id(), first.next_id()), (0, 1));
    assert_eq!(second.next_id(), 0);
    assert_eq!(first.allocated(), 2);
}

parameterized_test! {can_detect_invalid_instance, (request, expected), {
    can_detect_invalid_instance_impl(request, expected);
}}

can_detect_invalid_instance! {
    case01_location: (RequestBuilder::default().location(3), "node 2 has location 3 outside of the matrix"),
    case02_time_window: (RequestBuilder::default().time_window(5., 1.), "node 2 has invalid time window"),
    case03_demand: (RequestBuilder::default().demand(&[-1]), "node 2 has negative demand"),
    case04_service: (RequestBuilder::default().service_time(-1.), "request 2 has negative service time"),
    case05_dimensions: (RequestBuilder::default().demand(&[1; 9]), "node 2 has too many demand dimensions"),
}

fn can_detect_invalid_instance_impl(request: RequestBuilder, expected: &str) {
    let mut builder = InstanceBuilder::new(create_unit_transport(3));
    builder.add_technician(TechnicianBuilder::default());
    builder.add_request(request);

    let result = builder.build();

    assert_eq!(result.err().map(|err| err.to_string()), Some(expected.to_string()));
}

#[test]
fn can_detect_instance_without_technicians() {
    let mut builder = InstanceBuilder::new(create_unit_transport(3));
    builder.add_request(RequestBuilder::default());

    assert_eq!(builder.build().err().map(|err| err.to_string()), Some("instance has no technicians".to_string()));
}

#[test]
fn can_check_technician_skills_and_tools() {
    let mut builder = InstanceBuilder::new(create_unit_transport(3));
    builder.add_technician(TechnicianBuilder::default().skills([1, 2]).tools([7]));
    let simple = builder.add_request(RequestBuilder::default().skills([1]));
    let with_tool = builder.add_request(RequestBuilder::default().skills([2]).tools([7]));
    let unknown = builder.add_request(RequestBuilder::default().skills([3]));
    let instance = builder.build().unwrap();

    let technician = instance.technician(0).unwrap();
    assert!(technician.can_serve(instance.node(simple)));
    assert!(technician.can_serve(instance.node(with_tool)));
    assert!(!technician.can_serve(instance.node(unknown)));
}

#[test]
fn can_duplicate_main_depot_per_technician() {
    let mut builder = InstanceBuilder::new(create_unit_transport(4));
    builder.add_technician(TechnicianBuilder::default());
    builder.set_main_depot(DepotBuilder::default().location(3).time_window(2., 8.).service_time(1.5));
    builder.add_technician(TechnicianBuilder::default());
    let request = builder.add_request(RequestBuilder::default().location(1));
    let instance = builder.build().unwrap();

    assert_eq!(request, 4);
    assert_eq!(instance.node_count(), 7);
    assert_eq!(instance.requests(), &[4]);
    assert_eq!(instance.technician(0).and_then(|technician| technician.depot), Some(5));
    assert_eq!(instance.technician(1).and_then(|technician| technician.depot), Some(6));

    let depot = instance.node(6);
    assert_eq!(depot.kind, NodeKind::Depot);
    assert!(instance.is_depot(6) && !instance.is_request(6));
    assert_eq!((depot.location, depot.service_time), (3, 1.5));
    assert_eq!((depot.time_window.start, depot.time_window.end), (2., 8.));
}

#[test]
fn can_serve_tools_only_with_depot() {
    let create = |with_depot: bool| {
        let mut builder = InstanceBuilder::new(create_unit_transport(3));
        builder.add_technician(TechnicianBuilder::default().skills([1]));
        let request = builder.add_request(RequestBuilder::default().skills([1]).tools([7]));
        if with_depot {
            builder.set_main_depot(DepotBuilder::default());
        }

        (builder.build().unwrap(), request)
    };

    for (with_depot, expected) in [(false, false), (true, true)] {
        let (instance, request) = create(with_depot);
        let technician = instance.technician(0).unwrap();

        assert!(!technician.has_tools(instance.node(request)));
        assert_eq!(technician.can_serve(instance.node(request)), expected);
    }
}

#[test]
fn can_reject_invalid_main_depot() {
    let mut builder = InstanceBuilder::new(create_unit_transport(3));
    builder.add_technician(TechnicianBuilder::default());
    builder.set_main_depot(DepotBuilder::default().location(5).service_time(-1.));

    let error = builder.build().err().map(|err| err.to_string()).unwrap_or_default();

    assert!(error.contains("main depot has negative service time"), "{error}");
    assert!(error.contains("node 2 has location 5 outside of the matrix"), "{error}");
}
