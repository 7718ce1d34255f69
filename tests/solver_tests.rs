//! End-to-end solver scenarios on planted instances

use isd_solver::algorithm::{
    IsdGeneric, SubIsdLeeBrickell, SubIsdMmt, SubIsdPrange, SubIsdSternDumer,
    check_sd_solution,
};
use isd_solver::core::{Matrix, SolverRng, echelonize, transpose};
use isd_solver::tools::{ConfigMap, SdpGenerator};

/// Drive a solver with an iteration bound so a regression cannot hang the
/// suite; planted instances with these parameters solve far earlier.
fn solve_bounded<S: isd_solver::algorithm::SubIsd>(
    solver: &mut IsdGeneric<S>,
    max_iterations: u64,
) -> bool {
    solver.prepare_loop().unwrap();
    loop {
        if solver.loop_next().unwrap() {
            return true;
        }
        if solver.iterations() >= max_iterations {
            return false;
        }
    }
}

fn planted_instance(n: usize, k: usize, w: usize, seed: u64) -> SdpGenerator {
    let mut generator = SdpGenerator::with_seed(seed);
    generator.generate_planted(n, Some(k), Some(w)).unwrap();
    generator
}

#[test]
fn test_prange_n100_k50_w10() {
    let generator = planted_instance(100, 50, 10, 1);
    let mut solver = IsdGeneric::new(SubIsdPrange::new());
    solver.set_seed(1);
    solver.initialize(&generator.h().view(), &generator.s().view(), 10).unwrap();
    assert!(solve_bounded(&mut solver, 500_000), "Prange did not find the planted solution");
    let e = solver.get_solution().unwrap();
    assert!(e.hammingweight() <= 10);
    assert!(check_sd_solution(&generator.h().view(), &generator.s().view(), 10, &e.view()));
    assert!(solver.check_solution().unwrap());
}

#[test]
fn test_lee_brickell_p3_same_instance() {
    let generator = planted_instance(100, 50, 10, 1);
    let mut cfg = ConfigMap::new();
    cfg.insert("p".into(), "3".into());
    let mut solver = IsdGeneric::new(SubIsdLeeBrickell::new());
    solver.load_config(&cfg).unwrap();
    solver.set_seed(2);
    solver.initialize(&generator.h().view(), &generator.s().view(), 10).unwrap();
    assert!(solve_bounded(&mut solver, 100_000));
    let e = solver.get_solution().unwrap();
    assert!(check_sd_solution(&generator.h().view(), &generator.s().view(), 10, &e.view()));
}

#[test]
fn test_stern_dumer_p4_l14() {
    let generator = planted_instance(100, 50, 10, 1);
    let mut cfg = ConfigMap::new();
    cfg.insert("l".into(), "14".into());
    cfg.insert("p".into(), "4".into());
    let mut solver = IsdGeneric::new(SubIsdSternDumer::new());
    solver.load_config(&cfg).unwrap();
    solver.set_seed(3);
    solver.initialize(&generator.h().view(), &generator.s().view(), 10).unwrap();
    assert!(solve_bounded(&mut solver, 100_000));
    let e = solver.get_solution().unwrap();
    assert!(check_sd_solution(&generator.h().view(), &generator.s().view(), 10, &e.view()));
}

#[test]
fn test_mmt_p4_l1_6_l14() {
    let generator = planted_instance(100, 50, 10, 1);
    let mut cfg = ConfigMap::new();
    cfg.insert("l".into(), "14".into());
    cfg.insert("p".into(), "4".into());
    cfg.insert("l1".into(), "6".into());
    let mut sub = SubIsdMmt::new();
    sub.set_seed(4);
    let mut solver = IsdGeneric::new(sub);
    solver.load_config(&cfg).unwrap();
    solver.set_seed(4);
    solver.initialize(&generator.h().view(), &generator.s().view(), 10).unwrap();
    assert!(solve_bounded(&mut solver, 300_000));
    let e = solver.get_solution().unwrap();
    assert!(check_sd_solution(&generator.h().view(), &generator.s().view(), 10, &e.view()));
}

#[test]
fn test_update_strategies_all_solve() {
    for update_type in ["1", "2", "3", "4", "10", "12", "13", "14"] {
        let generator = planted_instance(60, 30, 5, 9);
        let mut cfg = ConfigMap::new();
        cfg.insert("updatetype".into(), update_type.into());
        let mut solver = IsdGeneric::new(SubIsdPrange::new());
        solver.load_config(&cfg).unwrap();
        solver.set_seed(11);
        solver.initialize(&generator.h().view(), &generator.s().view(), 5).unwrap();
        assert!(
            solve_bounded(&mut solver, 500_000),
            "update type {} did not solve",
            update_type
        );
        let e = solver.get_solution().unwrap();
        assert!(check_sd_solution(&generator.h().view(), &generator.s().view(), 5, &e.view()));
    }
}

#[test]
fn test_explicit_u_and_no_verify() {
    let generator = planted_instance(60, 30, 5, 13);
    let mut cfg = ConfigMap::new();
    cfg.insert("u".into(), "3".into());
    cfg.insert("no-verifysolution".into(), String::new());
    let mut solver = IsdGeneric::new(SubIsdPrange::new());
    solver.load_config(&cfg).unwrap();
    solver.set_seed(13);
    solver.initialize(&generator.h().view(), &generator.s().view(), 5).unwrap();
    assert!(solve_bounded(&mut solver, 500_000));
    // the solution is correct even with in-loop verification disabled
    assert!(solver.check_solution().unwrap());
}

#[test]
fn test_benchmark_mode_declares_success_without_solution() {
    let generator = planted_instance(60, 30, 5, 17);
    let mut solver = IsdGeneric::new(SubIsdPrange::new());
    solver.set_seed(17);
    solver.set_benchmark(true);
    solver.initialize(&generator.h().view(), &generator.s().view(), 5).unwrap();
    assert!(solve_bounded(&mut solver, 500_000));
    assert!(solver.get_solution().is_err());
}

#[test]
fn test_state_machine_guards() {
    let generator = planted_instance(40, 20, 4, 21);
    let mut solver = IsdGeneric::new(SubIsdPrange::new());
    assert!(solver.get_solution().is_err());
    assert!(solver.prepare_loop().is_err());
    solver.initialize(&generator.h().view(), &generator.s().view(), 4).unwrap();
    assert!(solver.loop_next().is_err());
    solver.prepare_loop().unwrap();
    assert!(solver.get_solution().is_err());
}

#[test]
fn test_prange_rejects_positive_l() {
    let generator = planted_instance(40, 20, 4, 23);
    let mut cfg = ConfigMap::new();
    cfg.insert("l".into(), "8".into());
    let mut solver = IsdGeneric::new(SubIsdPrange::new());
    solver.load_config(&cfg).unwrap();
    solver.initialize(&generator.h().view(), &generator.s().view(), 4).unwrap();
    assert!(solver.prepare_loop().is_err());
}

#[test]
fn test_solution_found_with_smaller_weight_than_bound() {
    // planted weight 4, bound 8: any weight <= 8 preimage is acceptable
    let generator = planted_instance(50, 25, 4, 29);
    let mut solver = IsdGeneric::new(SubIsdPrange::new());
    solver.set_seed(29);
    solver.initialize(&generator.h().view(), &generator.s().view(), 8).unwrap();
    assert!(solve_bounded(&mut solver, 500_000));
    let e = solver.get_solution().unwrap();
    assert!(e.hammingweight() <= 8);
    assert!(check_sd_solution(&generator.h().view(), &generator.s().view(), 8, &e.view()));
}

#[test]
fn test_transpose_involution_197() {
    let mut rng = SolverRng::from_seed(197);
    let mut m = Matrix::new(197, 197);
    for r in 0..197 {
        for c in 0..197 {
            if rng.next_u64() & 1 != 0 {
                m.set_bit(r, c);
            }
        }
    }
    let mut t = Matrix::new(197, 197);
    transpose(&mut t.view_mut(), &m.view());
    let mut m2 = Matrix::new(197, 197);
    transpose(&mut m2.view_mut(), &t.view());
    assert_eq!(m, m2);
}

#[test]
fn test_echelonize_full_rank_64x128() {
    let mut rng = SolverRng::from_seed(64);
    let mut m = Matrix::new(64, 128);
    // left identity block guarantees rank 64; the rest is random
    for r in 0..64 {
        m.set_bit(r, r);
        for c in 64..128 {
            if rng.next_u64() & 1 != 0 {
                m.set_bit(r, c);
            }
        }
    }
    // shuffle rows via xors so the matrix is not already reduced
    for r in 1..64 {
        let (src, dst) = m.row_pair_mut(r - 1, r);
        for i in 0..2 {
            dst[i] ^= src[i];
        }
    }
    let rank = echelonize(&mut m);
    assert_eq!(rank, 64);
    for r in 0..64 {
        for c in 0..64 {
            assert_eq!(m.get_bit(r, c), r == c);
        }
    }
}
