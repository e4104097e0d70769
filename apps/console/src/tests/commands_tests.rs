use super::*;

#[test]
fn blank_line_is_not_a_command() {
    assert_eq!(parse_command("   "), Ok(None));
}

#[test]
fn slot_numbers_are_one_based() {
    assert_eq!(
        parse_command("time 2 07:30"),
        Ok(Some(ConsoleCommand::SetTime {
            index: SlotIndex(1),
            time: "07:30".into(),
        }))
    );
    assert_eq!(
        parse_command("SAVE 1"),
        Ok(Some(ConsoleCommand::Save { index: SlotIndex(0) }))
    );
}

#[test]
fn feed_without_amount_passes_empty_text() {
    assert_eq!(
        parse_command("feed"),
        Ok(Some(ConsoleCommand::Feed {
            amount: String::new()
        }))
    );
}

#[test]
fn weight_value_is_not_interpreted() {
    assert_eq!(
        parse_command("weight 3 abc"),
        Ok(Some(ConsoleCommand::SetWeight {
            index: SlotIndex(2),
            weight: "abc".into(),
        }))
    );
}

#[test]
fn bad_slot_numbers_are_reported() {
    assert!(parse_command("save").unwrap_err().contains("missing slot"));
    assert!(parse_command("save 0").unwrap_err().contains("starting at 1"));
    assert!(parse_command("cancel x").unwrap_err().contains("'x'"));
}

#[test]
fn unknown_verb_points_at_help() {
    let err = parse_command("dance").unwrap_err();
    assert!(err.contains("dance"));
    assert!(err.contains("help"));
}

#[test]
fn aliases_map_to_the_same_command() {
    assert_eq!(parse_command("exit"), Ok(Some(ConsoleCommand::Quit)));
    assert_eq!(parse_command("?"), Ok(Some(ConsoleCommand::Help)));
}
