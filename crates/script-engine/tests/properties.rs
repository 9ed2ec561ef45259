use guirecord_common::config::RecorderConfig;
use guirecord_event_model::{ButtonState, KeySym, RecordedEvent};
use guirecord_script_engine::pointer::granularity_threshold;
use guirecord_script_engine::{Session, Statement};
use proptest::prelude::*;

const MODIFIERS: [KeySym; 4] = [0xffe1, 0xffe3, 0xffe9, 0xffeb];

fn arb_key_event() -> impl Strategy<Value = RecordedEvent> {
    let sym = prop_oneof![
        (0x20u32..=0x7e).prop_filter("literal brackets", |c| *c != 0x28 && *c != 0x29),
        prop::sample::select(MODIFIERS.to_vec()),
        prop::sample::select(vec![0xff08u32, 0xff0d, 0xffbe, 0xffff, 999]),
    ];
    let state = prop_oneof![Just(ButtonState::Down), Just(ButtonState::Up)];
    (0u64..2_000, sym, state).prop_map(|(delay, sym, state)| RecordedEvent::key(delay, sym, state))
}

fn arb_event() -> impl Strategy<Value = RecordedEvent> {
    let state = prop_oneof![Just(ButtonState::Down), Just(ButtonState::Up)];
    prop_oneof![
        4 => arb_key_event(),
        1 => (0u64..40, 0i32..1920, 0i32..1080)
            .prop_map(|(d, x, y)| RecordedEvent::mouse_move(d, x, y)),
        1 => (0u64..400, 0u32..6, state)
            .prop_map(|(d, b, s)| RecordedEvent::mouse_button(d, b, s)),
    ]
}

fn balanced(run: &str) -> bool {
    let mut depth = 0i64;
    let mut chars = run.chars();
    while let Some(c) = chars.next() {
        match c {
            // a braced name or escaped char never contains a bracket
            '\\' => {
                chars.next();
            }
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

proptest! {
    #[test]
    fn prop_quote_is_always_escaped(
        prefix in "[a-z]{0,10}",
        suffix in "[a-z]{0,10}",
    ) {
        let mut session = Session::new(&RecorderConfig::default()).unwrap();
        let mut out = Vec::new();
        let text = format!("{prefix}'{suffix}");
        for c in text.chars() {
            session.dispatch(&RecordedEvent::key(0, c as KeySym, ButtonState::Up), &mut out);
        }
        session.finish(&mut out);
        let all: String = out
            .iter()
            .filter_map(|s| match s {
                Statement::SendKeys(run) => Some(run.as_str()),
                _ => None,
            })
            .collect();
        prop_assert_eq!(all, format!("{prefix}\\'{suffix}"));
    }

    #[test]
    fn prop_runs_fit_capacity_and_stay_balanced(events in prop::collection::vec(arb_event(), 0..300)) {
        let mut session = Session::new(&RecorderConfig::default()).unwrap();
        let mut out = Vec::new();
        for event in &events {
            session.dispatch(event, &mut out);
            prop_assert!(session.key_buffer().emitted_len() <= session.key_buffer().capacity());
        }
        session.finish(&mut out);
        for statement in &out {
            if let Statement::SendKeys(run) = statement {
                prop_assert!(!run.is_empty());
                prop_assert!(run.len() <= 128);
                prop_assert!(balanced(run), "unbalanced run {}", run);
            }
        }
    }

    #[test]
    fn prop_rapid_move_runs_emit_once(granularity in 1u32..=10, count in 1usize..20) {
        let threshold = granularity_threshold(granularity);
        prop_assume!(threshold > 0);
        let config = RecorderConfig { granularity, ..RecorderConfig::default() };
        let mut session = Session::new(&config).unwrap();
        let mut out = Vec::new();
        for i in 0..count {
            let event = RecordedEvent::mouse_move(threshold - 1, i as i32, i as i32);
            session.dispatch(&event, &mut out);
            prop_assert_eq!(session.last_event(), Some(&event));
        }
        prop_assert_eq!(out, vec![Statement::MoveMouseAbs { x: 0, y: 0 }]);
    }

    #[test]
    fn prop_flush_is_idempotent(text in "[a-z]{1,20}") {
        let mut session = Session::new(&RecorderConfig::default()).unwrap();
        let mut out = Vec::new();
        for c in text.chars() {
            session.dispatch(&RecordedEvent::key(0, c as KeySym, ButtonState::Up), &mut out);
        }
        session.dispatch(&RecordedEvent::mouse_button(0, 1, ButtonState::Down), &mut out);
        session.dispatch(&RecordedEvent::mouse_button(0, 1, ButtonState::Up), &mut out);
        let runs = out.iter().filter(|s| matches!(s, Statement::SendKeys(_))).count();
        prop_assert_eq!(runs, 1);
    }
}
