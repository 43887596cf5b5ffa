use craps_engine::{EngineError, Phase, PhaseEngine, PointNumber, RollEvent};

fn p(v: u8) -> PointNumber {
    PointNumber::new(v).unwrap()
}

fn run(engine: &mut PhaseEngine, totals: &[u8]) -> Vec<RollEvent> {
    totals
        .iter()
        .map(|t| engine.process_roll(*t).unwrap())
        .collect()
}

#[test]
fn test_full_shooter() {
    let mut engine = PhaseEngine::new();

    let events = run(&mut engine, &[7, 11, 2, 3, 12, 6, 8, 5, 6, 9, 9, 7]);
    assert_eq!(
        events,
        vec![
            RollEvent::PassLineWin,
            RollEvent::PassLineWin,
            RollEvent::PassLineLoss,
            RollEvent::PassLineLoss,
            RollEvent::PassLineLoss,
            RollEvent::PointEstablished(p(6)),
            RollEvent::NoAction,
            RollEvent::NoAction,
            RollEvent::PointMade,
            RollEvent::PointEstablished(p(9)),
            RollEvent::PointMade,
            RollEvent::PassLineWin,
        ]
    );
    assert_eq!(engine.phase(), Phase::ComeOut);
}

#[test]
fn test_seven_out_resets_point() {
    let mut engine = PhaseEngine::new();
    run(&mut engine, &[10]);
    assert_eq!(engine.current_point(), Some(p(10)));
    assert!(engine.is_point_phase());

    // Craps numbers and 11 do nothing during the point phase.
    let events = run(&mut engine, &[2, 3, 11, 12]);
    assert!(events.iter().all(|e| *e == RollEvent::NoAction));

    assert_eq!(engine.process_roll(7).unwrap(), RollEvent::SevenOut);
    assert_eq!(engine.current_point(), None);
}

#[test]
fn test_every_point_can_be_established_and_made() {
    for point in PointNumber::ALL {
        let mut engine = PhaseEngine::new();
        assert_eq!(
            engine.process_roll(point.value()).unwrap(),
            RollEvent::PointEstablished(point)
        );
        assert_eq!(engine.process_roll(point.value()).unwrap(), RollEvent::PointMade);
        assert_eq!(engine.phase(), Phase::ComeOut);
    }
}

#[test]
fn test_out_of_range_totals_fail_loudly() {
    let mut engine = PhaseEngine::with_phase(Phase::Point(p(5)));
    for total in [0, 1, 13, 255] {
        assert_eq!(
            engine.process_roll(total),
            Err(EngineError::TotalOutOfRange(total))
        );
    }
    assert_eq!(engine.phase(), Phase::Point(p(5)));
}
