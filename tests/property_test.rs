//! Property tests over random reference strings.

use proptest::prelude::*;

use pagesim::{PageId, PolicyKind, ReferenceString, Simulation, SimulationConfig};

fn reference_strategy() -> impl Strategy<Value = ReferenceString> {
    prop::collection::vec(0i32..12, 1..80)
        .prop_map(|ids| ReferenceString::new(ids.into_iter().map(PageId::new).collect()).unwrap())
}

fn fault_count(kind: PolicyKind, frames: usize, refs: &ReferenceString) -> usize {
    let mut replacer = kind.build(frames, refs);
    refs.iter()
        .enumerate()
        .filter(|&(step, &page)| replacer.insert(page, step).is_fault())
        .count()
}

proptest! {
    #[test]
    fn occupancy_never_exceeds_frames(refs in reference_strategy(), frames in 1usize..8) {
        for kind in PolicyKind::ALL {
            let mut replacer = kind.build(frames, &refs);
            for (step, &page) in refs.iter().enumerate() {
                let outcome = replacer.insert(page, step);
                let table = replacer.frames();

                prop_assert!(table.len() <= frames);
                prop_assert_eq!(table.page(outcome.slot()), Some(page));

                let mut resident: Vec<_> = table.snapshot().into_iter().flatten().collect();
                let count = resident.len();
                resident.sort();
                resident.dedup();
                prop_assert_eq!(resident.len(), count, "{} holds a page twice", kind);
            }
        }
    }

    #[test]
    fn hit_iff_resident(refs in reference_strategy(), frames in 1usize..6) {
        for kind in PolicyKind::ALL {
            let mut replacer = kind.build(frames, &refs);
            for (step, &page) in refs.iter().enumerate() {
                let was_resident = replacer.frames().find(page).is_some();
                prop_assert_eq!(replacer.insert(page, step).is_hit(), was_resident);
            }
        }
    }

    #[test]
    fn fifo_evicts_in_arrival_order(refs in reference_strategy(), frames in 1usize..6) {
        let mut replacer = PolicyKind::Fifo.build(frames, &refs);
        let mut arrivals = std::collections::VecDeque::new();
        for (step, &page) in refs.iter().enumerate() {
            let outcome = replacer.insert(page, step);
            if let Some(evicted) = outcome.evicted() {
                prop_assert_eq!(arrivals.pop_front(), Some(evicted));
            }
            if outcome.is_fault() {
                arrivals.push_back(page);
            }
        }
    }

    #[test]
    fn optimal_is_a_lower_bound(refs in reference_strategy(), frames in 1usize..6) {
        let optimal = fault_count(PolicyKind::Optimal, frames, &refs);
        for kind in PolicyKind::ALL {
            prop_assert!(optimal <= fault_count(kind, frames, &refs), "{} beat Optimal", kind);
        }
    }

    #[test]
    fn lru_has_no_belady_anomaly(refs in reference_strategy(), frames in 1usize..6) {
        prop_assert!(
            fault_count(PolicyKind::Lru, frames + 1, &refs)
                <= fault_count(PolicyKind::Lru, frames, &refs)
        );
    }

    #[test]
    fn simulation_counts_every_request(refs in reference_strategy(), frames in 1i64..6) {
        let mut sim = Simulation::new(SimulationConfig::new(frames, 0).unwrap());
        sim.define_reference(&refs.to_string()).unwrap();
        sim.commit_setup(None).unwrap();

        let reports = sim.run_to_end().unwrap();
        prop_assert_eq!(reports.len(), refs.len());
        for (kind, stats) in sim.all_stats() {
            prop_assert_eq!(stats.requests() as usize, refs.len());
            prop_assert_eq!(stats.faults as usize, fault_count(kind, frames as usize, &refs));
        }
    }

    #[test]
    fn parse_round_trips_display(ids in prop::collection::vec(any::<i32>(), 1..20)) {
        let refs = ReferenceString::new(ids.into_iter().map(PageId::new).collect()).unwrap();
        prop_assert_eq!(refs.to_string().parse::<ReferenceString>().unwrap(), refs);
    }
}
