use castsim::xp::{XpError, XpTable, MAX_LEVEL};

#[test]
fn golden_thresholds_match_the_published_table() {
    let table = XpTable::generate();
    assert_eq!(table.xp_for_level(1).unwrap(), 0.0);
    assert_eq!(table.xp_for_level(2).unwrap(), 83.0);
    assert_eq!(table.xp_for_level(10).unwrap(), 1_154.0);
    assert_eq!(table.xp_for_level(13).unwrap(), 1_833.0);
    assert_eq!(table.xp_for_level(50).unwrap(), 101_333.0);
    assert_eq!(table.xp_for_level(92).unwrap(), 6_517_253.0);
    assert_eq!(table.xp_for_level(99).unwrap(), 13_034_431.0);
}

#[test]
fn thresholds_are_strictly_increasing_above_level_one() {
    let table = XpTable::generate();
    for level in 2..=MAX_LEVEL {
        let below = table.xp_for_level(level - 1).unwrap();
        let at = table.xp_for_level(level).unwrap();
        assert!(
            at > below,
            "threshold not increasing at level {level}: {below} -> {at}"
        );
    }
}

#[test]
fn level_for_xp_round_trips_every_level() {
    let table = XpTable::generate();
    for level in 1..=MAX_LEVEL {
        let xp = table.xp_for_level(level).unwrap();
        assert_eq!(table.level_for_xp(xp), level, "round trip failed at {level}");
    }
}

#[test]
fn level_for_xp_stays_below_the_next_threshold() {
    let table = XpTable::generate();
    for level in 1..MAX_LEVEL {
        let next = table.xp_for_level(level + 1).unwrap();
        assert_eq!(table.level_for_xp(next - 1.0), level);
    }
}

#[test]
fn xp_beyond_the_table_caps_at_99() {
    let table = XpTable::generate();
    assert_eq!(table.level_for_xp(200_000_000.0), MAX_LEVEL);
}

#[test]
fn zero_xp_is_level_one() {
    let table = XpTable::generate();
    assert_eq!(table.level_for_xp(0.0), 1);
    assert_eq!(table.level_for_xp(82.9), 1);
}

#[test]
fn out_of_bounds_levels_error_instead_of_clamping() {
    let table = XpTable::generate();
    assert_eq!(table.xp_for_level(0), Err(XpError::OutOfBounds { level: 0 }));
    assert_eq!(
        table.xp_for_level(MAX_LEVEL + 1),
        Err(XpError::OutOfBounds { level: 100 })
    );
    let message = table.xp_for_level(0).unwrap_err().to_string();
    assert!(message.contains("out of bounds"));
}
