use gen2bank::plan::{AntennaSet, ReadPlanBuilder};
use gen2bank::reader::MockReader;
use gen2bank::{AntennaId, Error};

#[test]
fn command_line_list_parses_in_order() {
    let set: AntennaSet = "4,1,2".parse().unwrap();
    let ports: Vec<u8> = set.antennas().iter().map(AntennaId::as_u8).collect();
    assert_eq!(ports, vec![4, 1, 2]);
}

#[test]
fn bad_tokens_name_the_token() {
    match "1,abc".parse::<AntennaSet>() {
        Err(Error::InvalidAntenna(msg)) => assert!(msg.contains("abc")),
        other => panic!("expected InvalidAntenna, got {:?}", other),
    }
    assert!(matches!(
        "1,0".parse::<AntennaSet>(),
        Err(Error::InvalidAntenna(_))
    ));
    assert!(matches!(
        "2,2".parse::<AntennaSet>(),
        Err(Error::DuplicateAntenna { .. })
    ));
}

#[test]
fn absent_list_uses_device_default() {
    let mut reader = MockReader::new("M6e");
    let composed = ReadPlanBuilder::new().build(&mut reader).unwrap();
    assert!(composed.plan.antennas().is_device_default());
    assert_eq!(composed.plan.tagop_antenna(), None);
}

#[test]
fn explicit_list_sets_tagop_antenna() {
    let mut reader = MockReader::new("M6e");
    let composed = ReadPlanBuilder::new()
        .antennas(&[2, 1])
        .build(&mut reader)
        .unwrap();
    assert_eq!(composed.plan.tagop_antenna(), AntennaId::new(2).ok());
}
