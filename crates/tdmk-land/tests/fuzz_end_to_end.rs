use proptest::prelude::*;
use tdmk_core::{CodomainFamily, Parameters};
use tdmk_land::{approx_equal, better, Landscape};

fn family_for(selector: u8) -> CodomainFamily {
    match selector % 5 {
        0 => CodomainFamily::Random,
        1 => CodomainFamily::Trap,
        2 => CodomainFamily::DeceptiveTrap,
        3 => CodomainFamily::NKq { q: 3 },
        _ => CodomainFamily::RandomDeceptiveTrap { p_deceptive: 0.4 },
    }
}

proptest! {
    #[test]
    fn constructed_landscapes_hold_their_contract(
        seed in any::<u64>(),
        m in 1u32..6,
        k in 1u32..5,
        overlap_fraction in 0u32..4,
        b in 1u32..4,
        selector in any::<u8>(),
    ) {
        let o = overlap_fraction % k;
        let parameters = Parameters::new(m, k, o, b).unwrap();
        let family = family_for(selector);
        let landscape = Landscape::construct(parameters, family, seed).unwrap();

        prop_assert_eq!(landscape.num_variables(), (m - 1) * (k - o) + k);
        prop_assert!(landscape.optimum_count() >= 1);

        for optimum in landscape.optima() {
            let fitness = landscape.evaluate(optimum).unwrap();
            prop_assert!(approx_equal(fitness, landscape.optimum_score()));
            prop_assert!(landscape.is_global_optimum(optimum, fitness).unwrap());
        }

        // Exhaustive cross-check while the assignment space stays small.
        let l = landscape.num_variables() as usize;
        if l <= 12 {
            let mut best = f64::NEG_INFINITY;
            let mut count = 0usize;
            for assignment in 0..1usize << l {
                let solution: Vec<u8> = (0..l)
                    .map(|bit| ((assignment >> (l - 1 - bit)) & 1) as u8)
                    .collect();
                let fitness = landscape.evaluate(&solution).unwrap();
                if count == 0 || better(fitness, best) {
                    best = fitness;
                    count = 1;
                } else if approx_equal(fitness, best) {
                    count += 1;
                }
            }
            prop_assert!(approx_equal(best, landscape.optimum_score()));
            prop_assert_eq!(count, landscape.optimum_count());
        }
    }
}
