#[cfg(test)]
#[allow(clippy::unwrap_used, unused_results)]
mod tests {
    use crate::reclassify::{AffinityRefresh, Engine, MoveSchedule, Nnra};
    use crate::{similarity_from_rows, Error, Result};
    use ndarray::Array2;
    use proptest::prelude::*;

    fn golden() -> Array2<f64> {
        similarity_from_rows(&[
            vec![1.0, 0.5, 0.4, 0.2, 0.6, 0.2],
            vec![0.5, 1.0, 0.3, 0.4, 0.6, 0.3],
            vec![0.4, 0.3, 1.0, 0.8, 0.1, 0.5],
            vec![0.2, 0.4, 0.8, 1.0, 0.1, 0.4],
            vec![0.6, 0.6, 0.1, 0.1, 1.0, 0.2],
            vec![0.2, 0.3, 0.5, 0.4, 0.2, 1.0],
        ])
        .unwrap()
    }

    fn golden_ids() -> Vec<String> {
        (1..=6).map(|i| format!("ID{i}")).collect()
    }

    #[test]
    fn test_golden_scenario() -> Result<()> {
        let mut engine = Engine::new(golden_ids(), &[0, 0, 1, 1, 1, 2], golden(), 3)?;
        let report = engine.run()?;

        assert!(report.rounds < 50);
        assert_eq!(report.moves_per_round, vec![1]);
        assert_eq!(engine.labels(), &[0, 0, 1, 1, 0, 2]);
        assert!(engine.labels().iter().all(|&l| l < 3));
        assert!(engine.propose().is_empty());

        // ID5 leaves the {ID3, ID4} cluster for {ID1, ID2}.
        let moved: Vec<&str> = engine
            .assignments()
            .filter(|(_, l)| *l == 0)
            .map(|(id, _)| id.as_str())
            .collect();
        assert_eq!(moved, vec!["ID1", "ID2", "ID5"]);
        Ok(())
    }

    #[test]
    fn test_golden_modularity_increases() -> Result<()> {
        let mut engine = Engine::new(golden_ids(), &[0, 0, 1, 1, 1, 2], golden(), 3)?;
        let before = engine.modularity();
        let report = engine.run()?;

        assert!((before - 0.12871822606814493).abs() < 1e-9);
        assert!((report.modularity_before - before).abs() < 1e-15);
        assert!((report.modularity_after - 0.14014332071389943).abs() < 1e-9);
        assert!(report.modularity_after >= report.modularity_before);
        Ok(())
    }

    #[test]
    fn test_golden_schedules_agree() -> Result<()> {
        for nnra in [
            Nnra::new(3).with_schedule(MoveSchedule::Greedy),
            Nnra::new(3).with_refresh(AffinityRefresh::Rebuild),
        ] {
            let mut engine = nnra.engine(golden_ids(), &[0, 0, 1, 1, 1, 2], golden())?;
            engine.run()?;
            assert_eq!(engine.labels(), &[0, 0, 1, 1, 0, 2]);
        }
        Ok(())
    }

    #[test]
    fn test_single_class_never_moves() -> Result<()> {
        let labels = [0; 6];
        let mut engine = Engine::new(golden_ids(), &labels, golden(), 1)?;
        let report = engine.run()?;
        assert_eq!(report.rounds, 0);
        assert_eq!(engine.labels(), &labels);
        assert!(engine.modularity().abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_single_item_is_converged() -> Result<()> {
        for label in 0..3 {
            let s = Array2::from_elem((1, 1), 1.0);
            let mut engine = Engine::new(vec!["only"], &[label], s, 3)?;
            let report = engine.run()?;
            assert_eq!(report.rounds, 0);
            assert_eq!(engine.labels(), &[label]);
        }
        Ok(())
    }

    #[test]
    fn test_empty_class_is_valid_state() -> Result<()> {
        let mut engine = Engine::new(golden_ids(), &[0, 0, 0, 2, 2, 2], golden(), 3)?;
        assert!(engine.grouping().members(1).is_empty());
        assert_eq!(engine.affinity().row_sum(1), 0.0);
        let _ = engine.run()?;
        assert!(engine.labels().iter().all(|&l| l < 3));
        assert!(engine.propose().is_empty());
        Ok(())
    }

    #[test]
    fn test_zero_mass_is_rejected() {
        let s = Array2::<f64>::zeros((3, 3));
        let err = Engine::new(vec![0, 1, 2], &[0, 1, 0], s, 2).unwrap_err();
        assert_eq!(err, Error::DegenerateInput);
    }

    #[test]
    fn test_overflowing_mass_is_rejected() {
        let s = Array2::from_elem((2, 2), 1e308);
        let err = Engine::new(vec![0, 1], &[0, 1], s, 2).unwrap_err();
        assert_eq!(err, Error::DegenerateInput);
    }

    #[test]
    fn test_batch_oscillation_hits_round_limit() -> Result<()> {
        // Items 2, 3, 4, 5 swap between classes 1 and 3 every round.
        let s = similarity_from_rows(&[
            vec![1.0, 0.5, 0.4, 0.6, 0.0, 0.0],
            vec![0.5, 1.0, 0.1, 0.1, 0.7, 0.6],
            vec![0.4, 0.1, 1.0, 0.9, 0.6, 0.1],
            vec![0.6, 0.1, 0.9, 1.0, 0.0, 1.0],
            vec![0.0, 0.7, 0.6, 0.0, 1.0, 1.0],
            vec![0.0, 0.6, 0.1, 1.0, 1.0, 1.0],
        ])?;
        let start = [0, 0, 3, 1, 1, 3];
        let flipped = [0, 0, 1, 3, 3, 1];

        let nnra = Nnra::new(4).with_max_rounds(20);
        let mut engine = nnra.engine((0..6).collect::<Vec<usize>>(), &start, s.clone())?;

        let candidates = engine.propose();
        let moved: Vec<usize> = candidates.iter().map(|c| c.item).collect();
        assert_eq!(moved, vec![2, 3, 4, 5]);

        assert_eq!(engine.run(), Err(Error::ConvergenceFailure { iterations: 20 }));
        assert!(!engine.is_converged());
        // An even number of rounds lands back on the starting labels.
        assert_eq!(engine.labels(), &start);

        let nnra = Nnra::new(4).with_max_rounds(3);
        let mut engine = nnra.engine((0..6).collect::<Vec<usize>>(), &start, s)?;
        assert_eq!(engine.run(), Err(Error::ConvergenceFailure { iterations: 3 }));
        assert_eq!(engine.labels(), &flipped);
        Ok(())
    }

    #[test]
    fn test_modularity_rises_every_round() -> Result<()> {
        let s = similarity_from_rows(&[
            vec![1.0, 0.8, 0.2, 0.5, 0.7, 0.6, 0.4],
            vec![0.8, 1.0, 0.6, 0.2, 0.9, 1.0, 0.7],
            vec![0.2, 0.6, 1.0, 0.2, 1.0, 0.4, 0.7],
            vec![0.5, 0.2, 0.2, 1.0, 0.3, 0.4, 0.2],
            vec![0.7, 0.9, 1.0, 0.3, 1.0, 0.6, 1.0],
            vec![0.6, 1.0, 0.4, 0.4, 0.6, 1.0, 1.0],
            vec![0.4, 0.7, 0.7, 0.2, 1.0, 1.0, 1.0],
        ])?;
        let mut engine = Engine::new((0..7).collect::<Vec<usize>>(), &[1, 1, 0, 0, 0, 0, 1], s, 2)?;

        let mut q = engine.modularity();
        let mut history = vec![q];
        for _ in 0..10 {
            let candidates = engine.propose();
            if candidates.is_empty() {
                break;
            }
            for c in candidates {
                engine.apply(c);
            }
            let next = engine.modularity();
            assert!(next > q, "modularity fell from {q} to {next}");
            q = next;
            history.push(q);
        }

        assert_eq!(history.len(), 4);
        assert!((history[0] - 0.01756259641628094).abs() < 1e-9);
        assert!((history[3] - 0.04353071476602993).abs() < 1e-9);
        assert_eq!(engine.labels(), &[1, 1, 1, 0, 1, 1, 1]);
        assert!(engine.propose().is_empty());
        Ok(())
    }

    #[test]
    fn test_out_of_range_label_is_rejected() {
        let err = Engine::new(golden_ids(), &[0, 0, 1, 1, 3, 2], golden(), 3).unwrap_err();
        assert_eq!(
            err,
            Error::LabelOutOfRange {
                index: 4,
                label: 3,
                n_classes: 3
            }
        );
    }

    fn instance() -> impl Strategy<Value = (Array2<f64>, Vec<usize>, usize)> {
        (1usize..9, 1usize..5).prop_flat_map(|(n, k)| {
            (
                proptest::collection::vec(0.0f64..1.0, n * n),
                proptest::collection::vec(0..k, n),
                Just(n),
                Just(k),
            )
                .prop_map(|(upper, labels, n, k)| {
                    let mut s = Array2::zeros((n, n));
                    for i in 0..n {
                        s[[i, i]] = 1.0;
                        for j in (i + 1)..n {
                            let v = upper[i * n + j];
                            s[[i, j]] = v;
                            s[[j, i]] = v;
                        }
                    }
                    (s, labels, k)
                })
        })
    }

    fn check_invariants(engine: &Engine<usize>, s: &Array2<f64>) -> std::result::Result<(), TestCaseError> {
        let t = engine.total_mass();
        let a = engine.membership();
        for i in 0..a.n_items() {
            let expected = s.row(i).sum() / t;
            prop_assert!((a.row_sum(i) - expected).abs() < 1e-9);
        }

        let e = engine.affinity();
        prop_assert!((e.total() - 1.0).abs() < 1e-9);
        for x in 0..e.n_classes() {
            for y in 0..e.n_classes() {
                prop_assert_eq!(e.get(x, y), e.get(y, x));
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn invariants_hold_after_every_move((s, labels, k) in instance()) {
            let ids: Vec<usize> = (0..labels.len()).collect();
            let mut engine = Engine::new(ids, &labels, s.clone(), k).unwrap();
            check_invariants(&engine, &s)?;

            for _ in 0..50 {
                let candidates = engine.propose();
                if candidates.is_empty() {
                    break;
                }
                for c in candidates {
                    prop_assert!(c.delta > 0.0);
                    prop_assert_ne!(c.from, c.to);
                    engine.apply(c);
                    check_invariants(&engine, &s)?;
                }
            }
        }

        #[test]
        fn converged_engine_has_no_candidates((s, labels, k) in instance()) {
            let ids: Vec<usize> = (0..labels.len()).collect();
            let mut engine = Engine::new(ids, &labels, s, k).unwrap();
            if engine.run().is_ok() {
                prop_assert!(engine.is_converged());
                prop_assert!(engine.propose().is_empty());
                prop_assert!(engine.labels().iter().all(|&l| l < k));
                prop_assert_eq!(engine.run().unwrap().rounds, 0);
            }
        }
    }
}
