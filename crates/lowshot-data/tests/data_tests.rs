// Tests for lowshot-data: selection primitives and generators

use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use lowshot_core::{Dataset, Features, Labels, Result};
use lowshot_data::{
    balanced_task_support, random_task_batch, task_view, task_view_excluding_support,
    EpisodeConfig, EpisodeGenerator, SupportConfig, SupportGenerator, TaskSupport,
};

// Fixtures

/// Six samples, one task, y = [1,1,1,0,0,0], all measured.
fn six_sample() -> Dataset {
    Dataset::new(
        Features::scalars(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]),
        Labels::matrix(vec![1.0, 1.0, 1.0, 0.0, 0.0, 0.0], 1).unwrap(),
        Labels::matrix(vec![1.0; 6], 1).unwrap(),
        ["a", "b", "c", "d", "e", "f"],
    )
    .unwrap()
}

/// Two tasks with both classes present on each.
fn two_task() -> Dataset {
    Dataset::new(
        Features::rows((0..16).map(|v| v as f64).collect(), 4).unwrap(),
        Labels::from_rows(&[
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 1.0],
            vec![0.0, 0.0],
        ])
        .unwrap(),
        Labels::matrix(vec![1.0; 8], 2).unwrap(),
        ["w", "x", "y", "z"],
    )
    .unwrap()
}

/// Build a dataset from generated per-sample (label, weight) columns.
fn from_columns(cells: &[Vec<(u8, bool)>], n_tasks: usize) -> Dataset {
    let n = cells.len();
    let y: Vec<f64> = cells.iter().flatten().map(|&(l, _)| l as f64).collect();
    let w: Vec<f64> = cells
        .iter()
        .flatten()
        .map(|&(_, m)| if m { 1.0 } else { 0.0 })
        .collect();
    Dataset::new(
        Features::scalars((0..n).map(|i| i as f64).collect()),
        Labels::matrix(y, n_tasks).unwrap(),
        Labels::matrix(w, n_tasks).unwrap(),
        (0..n).map(|i| format!("id{i}")),
    )
    .unwrap()
}

fn dataset_strategy() -> impl Strategy<Value = (Dataset, usize)> {
    (1usize..4).prop_flat_map(|n_tasks| {
        prop::collection::vec(
            prop::collection::vec((0u8..3, any::<bool>()), n_tasks),
            0..24,
        )
        .prop_map(move |cells| (from_columns(&cells, n_tasks), n_tasks))
    })
}

// Concrete scenarios

#[test]
fn test_six_sample_balanced_support() {
    let ds = six_sample();
    let mut rng = StdRng::seed_from_u64(42);
    let s = balanced_task_support(&ds, 2, 2, 0, true, &mut rng).unwrap();
    assert_eq!(s.len(), 4);
    let pos: HashSet<&str> = ["a", "b", "c"].into_iter().collect();
    let neg: HashSet<&str> = ["d", "e", "f"].into_iter().collect();
    assert!(s.ids()[..2].iter().all(|id| pos.contains(id.as_str())));
    assert!(s.ids()[2..].iter().all(|id| neg.contains(id.as_str())));
}

#[test]
fn test_two_tasks_two_trials() {
    let ds = two_task();
    let cfg = SupportConfig::default()
        .n_pos(1)
        .n_neg(1)
        .n_trials(2)
        .replace(true);
    let pairs: Vec<TaskSupport> = SupportGenerator::new(&ds, vec![0, 1], cfg)
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(pairs.len(), 4);
    let first: HashSet<usize> = pairs[..2].iter().map(|p| p.task).collect();
    let second: HashSet<usize> = pairs[2..].iter().map(|p| p.task).collect();
    assert_eq!(first, HashSet::from([0, 1]));
    assert_eq!(second, HashSet::from([0, 1]));
    for p in &pairs {
        assert_eq!(p.support.len(), 2);
        assert_eq!(p.support.y().as_slice(), &[1.0, 0.0]);
    }
}

#[test]
fn test_zero_trials_yields_nothing() {
    let ds = two_task();
    let mut gen = SupportGenerator::new(&ds, vec![0, 1], SupportConfig::default().n_trials(0));
    assert!(gen.is_exhausted());
    assert!(gen.advance().unwrap().is_none());
    assert_eq!(gen.count(), 0);
}

#[test]
fn test_zero_counts_yield_empty_support() {
    let ds = six_sample();
    let mut rng = StdRng::seed_from_u64(1);
    let s = balanced_task_support(&ds, 0, 0, 0, false, &mut rng).unwrap();
    assert_eq!(s.len(), 0);
    assert!(s.ids().is_empty());
}

#[test]
fn test_empty_task_list_is_exhausted() {
    let ds = six_sample();
    let gen = SupportGenerator::new(&ds, vec![], SupportConfig::default().n_trials(5));
    assert_eq!(gen.len(), 0);
    assert_eq!(gen.count(), 0);
}

#[test]
fn test_permutation_redrawn_after_each_trial() {
    let ds = two_task();
    let tasks: Vec<usize> = vec![0, 1];
    // With two tasks a fixed order would repeat; over many seeds some trial
    // must flip the order if the permutation is redrawn.
    let flipped = (0..32u64).any(|seed| {
        let cfg = SupportConfig::default().n_trials(2).seed(seed);
        let order: Vec<usize> = SupportGenerator::new(&ds, tasks.clone(), cfg)
            .map(|r| r.unwrap().task)
            .collect();
        order[..2] != order[2..]
    });
    assert!(flipped);
}

#[test]
fn test_support_feeds_back_into_task_view() {
    let ds = two_task();
    let mut rng = StdRng::seed_from_u64(3);
    let support = balanced_task_support(&ds, 1, 1, 1, false, &mut rng).unwrap();
    // a support is itself a single-task dataset
    let view = task_view(&support, 0).unwrap();
    assert_eq!(view.ids(), support.ids());
    let batch = random_task_batch(&support, 2, 0, false, &mut rng).unwrap();
    assert_eq!(batch.len(), 2);
}

#[test]
fn test_episode_generator_runs_full_schedule() {
    let ds = six_sample();
    let cfg = EpisodeConfig::default()
        .support(SupportConfig::default().n_pos(1).n_neg(1).n_trials(4).replace(false).seed(5))
        .n_query(4);
    let gen = EpisodeGenerator::new(&ds, vec![0], cfg);
    assert_eq!(gen.len(), 4);
    for ep in gen {
        let ep = ep.unwrap();
        let support_ids: HashSet<&String> = ep.support.ids().iter().collect();
        let mut query_ids: Vec<&String> = ep.query.ids().iter().collect();
        query_ids.sort();
        query_ids.dedup();
        assert_eq!(query_ids.len(), 4);
        assert!(query_ids.iter().all(|id| !support_ids.contains(id)));
    }
}

// Properties

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_task_view_keeps_only_measured_rows((ds, n_tasks) in dataset_strategy(), t in 0usize..4) {
        let t = t % n_tasks;
        let view = task_view(&ds, t).unwrap();
        let w_col = ds.w().task_column(t).unwrap();
        let measured = w_col.iter().filter(|&&w| w != 0.0).count();
        prop_assert_eq!(view.len(), measured);
        prop_assert!(view.w().as_slice().iter().all(|&w| w != 0.0));
        prop_assert!(view.y().is_collapsed());
    }

    #[test]
    fn prop_excluding_support_is_disjoint_subset(
        (ds, n_tasks) in dataset_strategy(),
        t in 0usize..4,
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..6),
    ) {
        let t = t % n_tasks;
        let rows: Vec<usize> = if ds.is_empty() {
            Vec::new()
        } else {
            picks.iter().map(|p| p.index(ds.len())).collect()
        };
        let support = ds.select_task(&rows, t).unwrap();
        let held_out = task_view_excluding_support(&ds, &support, t).unwrap();
        let view = task_view(&ds, t).unwrap();
        let view_ids: HashSet<&String> = view.ids().iter().collect();
        let support_ids: HashSet<&String> = support.ids().iter().collect();
        for id in held_out.ids() {
            prop_assert!(!support_ids.contains(id));
            prop_assert!(view_ids.contains(id));
        }
    }

    #[test]
    fn prop_balanced_support_layout(
        (ds, n_tasks) in dataset_strategy(),
        t in 0usize..4,
        n_pos in 0usize..5,
        n_neg in 0usize..5,
        seed in any::<u64>(),
    ) {
        let t = t % n_tasks;
        let y_col = ds.y().task_column(t).unwrap();
        let has_pos = y_col.iter().any(|&v| v == 1.0);
        let has_neg = y_col.iter().any(|&v| v == 0.0);
        prop_assume!((has_pos || n_pos == 0) && (has_neg || n_neg == 0));

        let mut rng = StdRng::seed_from_u64(seed);
        let s = balanced_task_support(&ds, n_pos, n_neg, t, true, &mut rng).unwrap();
        prop_assert_eq!(s.len(), n_pos + n_neg);
        let y = s.y().as_slice();
        prop_assert!(y[..n_pos].iter().all(|&v| v == 1.0));
        prop_assert!(y[n_pos..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn prop_generator_exhaustion_and_coverage(
        n_tasks in 1usize..5,
        n_trials in 0usize..5,
        seed in any::<u64>(),
    ) {
        // every task has one positive and one negative
        let cells: Vec<Vec<(u8, bool)>> = vec![
            vec![(1, true); n_tasks],
            vec![(0, true); n_tasks],
        ];
        let ds = from_columns(&cells, n_tasks);
        let tasks: Vec<usize> = (0..n_tasks).collect();
        let cfg = SupportConfig::default().n_trials(n_trials).seed(seed);
        let mut gen = SupportGenerator::new(&ds, tasks.clone(), cfg);

        let mut order = Vec::new();
        while let Some(ts) = gen.advance().unwrap() {
            order.push(ts.task);
        }
        prop_assert_eq!(order.len(), n_tasks * n_trials);
        for _ in 0..3 {
            prop_assert!(gen.advance().unwrap().is_none());
        }
        for chunk in order.chunks(n_tasks) {
            let mut c = chunk.to_vec();
            c.sort_unstable();
            prop_assert_eq!(&c, &tasks);
        }
    }
}
