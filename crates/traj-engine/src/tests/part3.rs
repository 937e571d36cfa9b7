fn real_column(table: &traj_io::ResultTable, idx: usize) -> Vec<f64> {
    match &table.columns()[idx] {
        traj_io::Column::Real(v) => v.clone(),
        other => panic!("expected real column, got {other:?}"),
    }
}

fn count_column(table: &traj_io::ResultTable, idx: usize) -> Vec<u64> {
    match &table.columns()[idx] {
        traj_io::Column::Count(v) => v.clone(),
        other => panic!("expected count column, got {other:?}"),
    }
}

#[test]
fn run_plan_attaches_zeroed_axis_for_msd() {
    let plan = MsdPlan::new(pbc(10.0));
    let mut reader = InMemoryTraj::positions(hopping_pair());
    let mut log = InMemoryLog {
        stamps: vec![10.0, 11.0, 12.5, 14.0],
    };
    let table = Executor::run_plan(&plan, &mut reader, Some(&mut log)).unwrap();
    assert_eq!(table.n_rows(), 3);
    assert_eq!(table.n_cols(), 4);
    assert_relative_eq!(table.axis()[0], 0.0);
    assert_relative_eq!(table.axis()[1], 1.5);
    assert_relative_eq!(table.axis()[2], 3.0);
    assert_relative_eq!(real_column(&table, 0)[1], 0.5);
    assert_eq!(count_column(&table, 2), vec![6, 4, 2]);
}

#[test]
fn run_plan_keeps_elapsed_axis_for_fsk() {
    let plan = FskPlan::new(pbc(10.0));
    let mut reader = InMemoryTraj::positions(hopping_pair());
    let mut log = InMemoryLog {
        stamps: vec![0.0, 2.0, 4.0, 6.0],
    };
    let table = Executor::run_plan(&plan, &mut reader, Some(&mut log)).unwrap();
    // lags 1 and 2 against the stamp just before the tail
    assert_eq!(table.axis(), &[2.0, 4.0]);
    assert_eq!(count_column(&table, 2), vec![12, 6]);
}

#[test]
fn run_plan_rejects_short_timestamp_log() {
    let plan = MsdPlan::new(pbc(10.0));
    let mut reader = InMemoryTraj::positions(hopping_pair());
    let mut log = InMemoryLog {
        stamps: vec![0.0, 1.0, 2.0],
    };
    let err = Executor::run_plan(&plan, &mut reader, Some(&mut log)).unwrap_err();
    assert!(matches!(err, TrajError::Shape(_)));
}

#[test]
fn capped_lags_keep_their_own_times() {
    let stamps = vec![0.0, 1.0, 3.0, 6.0];
    let full = MsdPlan::new(pbc(10.0));
    let mut reader = InMemoryTraj::positions(hopping_pair());
    let mut log = InMemoryLog {
        stamps: stamps.clone(),
    };
    let table = Executor::run_plan(&full, &mut reader, Some(&mut log)).unwrap();
    assert_eq!(table.axis(), &[0.0, 2.0, 5.0]);

    let capped = MsdPlan::new(pbc(10.0)).with_max_lag(Some(1));
    let mut log = InMemoryLog {
        stamps: stamps.clone(),
    };
    let table = Executor::run_plan(&capped, &mut reader, Some(&mut log)).unwrap();
    assert_eq!(table.axis(), &[0.0, 2.0]);
    assert_eq!(count_column(&table, 2), vec![6, 4]);

    // lags from 1: elapsed times 2 and 5 after the stamp at 1
    let fsk = FskPlan::new(pbc(10.0)).with_max_lag(Some(1));
    let mut log = InMemoryLog { stamps };
    let table = Executor::run_plan(&fsk, &mut reader, Some(&mut log)).unwrap();
    assert_eq!(table.axis(), &[2.0]);
}

struct CountingPlan {
    runs: std::cell::Cell<usize>,
}

impl Plan for CountingPlan {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn requirements(&self) -> PlanRequirements {
        PlanRequirements::new(TrajectoryKind::Positions, Some(TimeAxisMode::Zeroed))
    }

    fn run(&self, _traj: &Trajectory) -> TrajResult<PlanOutput> {
        self.runs.set(self.runs.get() + 1);
        Ok(PlanOutput::TimeSeries(Vec::new()))
    }
}

#[test]
fn short_log_fails_before_the_plan_runs() {
    let plan = CountingPlan {
        runs: std::cell::Cell::new(0),
    };
    let mut reader = InMemoryTraj::positions(hopping_pair());
    let mut log = InMemoryLog {
        stamps: vec![0.0, 1.0],
    };
    let err = Executor::run_plan(&plan, &mut reader, Some(&mut log)).unwrap_err();
    assert!(matches!(err, TrajError::Shape(_)));
    assert_eq!(plan.runs.get(), 0);

    let mut log = InMemoryLog {
        stamps: vec![0.0, 1.0, 2.0, 3.0],
    };
    Executor::run_plan(&plan, &mut reader, Some(&mut log)).unwrap();
    assert_eq!(plan.runs.get(), 1);
}

#[test]
fn run_plan_falls_back_to_lag_index() {
    let plan = VelocityAutoCorrPlan::new();
    let mut reader = InMemoryTraj::velocities(vec![vec![[1.0, 0.0, 0.0]]; 3]);
    let table = Executor::run_plan(&plan, &mut reader, None).unwrap();
    assert_eq!(table.axis(), &[0.0, 1.0, 2.0]);
}

#[test]
fn run_plan_checks_input_kind() {
    let plan = VelocityAutoCorrPlan::new();
    let mut reader = InMemoryTraj::positions(hopping_pair());
    let err = Executor::run_plan(&plan, &mut reader, None).unwrap_err();
    assert!(matches!(err, TrajError::Invalid(_)));
}

#[test]
fn run_plan_lays_out_rdf_columns() {
    let plan = RdfPlan::new(pbc(10.0), 2, 1, 10).unwrap();
    let mut reader = InMemoryTraj::positions(hopping_pair());
    let table = Executor::run_plan(&plan, &mut reader, None).unwrap();
    assert_eq!(table.n_rows(), 10);
    assert_relative_eq!(table.axis()[0], 0.5);
    // separations 5, 4 and 3 over three snapshots
    let counts = count_column(&table, 2);
    assert_eq!(counts[3], 1);
    assert_eq!(counts[4], 1);
    assert_eq!(counts[5], 1);
}

fn write_inputs(dir: &std::path::Path, frames: usize, with_velocities: bool) {
    let mut rtraj = String::new();
    let mut vtraj = String::new();
    for t in 0..frames {
        rtraj.push_str(&format!("{},1,1\n6,1,1\n", 1.0 + 0.5 * t as f64));
        vtraj.push_str(&format!("0.5,0,0\n0,{},0\n", t));
    }
    std::fs::write(dir.join("rtraj.csv"), rtraj).unwrap();
    if with_velocities {
        std::fs::write(dir.join("vtraj.csv"), vtraj).unwrap();
    }
    let energies: String = (0..=frames)
        .map(|t| format!("{t},-1.0,0.5\n"))
        .collect();
    std::fs::write(dir.join("Energies.csv"), energies).unwrap();
}

fn small_config(input: &std::path::Path, output: &std::path::Path) -> AnalysisConfig {
    AnalysisConfig {
        n_particles: 2,
        n_active: 2,
        box_length: 10.0,
        gr_stride: 1,
        gr_bins: 10,
        input_dir: input.to_path_buf(),
        output_dir: output.to_path_buf(),
        ..AnalysisConfig::default()
    }
}

fn line_count(path: &std::path::Path) -> usize {
    std::fs::read_to_string(path).unwrap().lines().count()
}

#[test]
fn run_all_writes_every_table() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_inputs(input.path(), 4, true);
    let cfg = small_config(input.path(), &output.path().join("results"));
    let exec = Executor::new(cfg.validated().unwrap());
    let report = exec.run_all(Vec::new()).unwrap();
    let report = String::from_utf8(report).unwrap();

    assert!(report.starts_with("Post-processing launched: "));
    for title in ["Fsk", "g(r)", "MSD", "Cvv"] {
        assert!(report.contains(&format!("\nCalculating {title}...\n")));
    }
    assert_eq!(report.matches("Task completed: ").count(), 4);
    assert!(report.contains("Total Elapsed time: "));

    let cfg = exec.config();
    assert_eq!(line_count(&cfg.output_path(AnalysisKind::Fsk)), 3);
    assert_eq!(line_count(&cfg.output_path(AnalysisKind::Gr)), 10);
    assert_eq!(line_count(&cfg.output_path(AnalysisKind::Msd)), 4);
    assert_eq!(line_count(&cfg.output_path(AnalysisKind::Cvv)), 4);

    let msd = std::fs::read_to_string(cfg.output_path(AnalysisKind::Msd)).unwrap();
    let mut rows = msd.lines();
    assert_eq!(rows.next(), Some("0,0,0,8"));
    // particle 0 moves 0.5 per frame, particle 1 is fixed
    assert_eq!(rows.next(), Some("1,0.125,0.015625,6"));

    let fsk = std::fs::read_to_string(cfg.output_path(AnalysisKind::Fsk)).unwrap();
    assert!(fsk.starts_with("1,"));
}

#[test]
fn run_all_aborts_on_first_failure() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_inputs(input.path(), 4, false);
    let mut cfg = small_config(input.path(), output.path());
    cfg.analyses = vec![AnalysisKind::Cvv, AnalysisKind::Msd];
    let exec = Executor::new(cfg);
    let err = exec.run_all(Vec::new()).unwrap_err();
    assert_eq!(err.stage(), Some("cvv"));
    assert!(err.to_string().contains("vtraj.csv"));
    assert!(!exec.config().output_path(AnalysisKind::Msd).exists());
}

#[test]
fn run_all_isolates_failures_when_asked() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_inputs(input.path(), 4, false);
    let mut cfg = small_config(input.path(), output.path());
    cfg.analyses = vec![AnalysisKind::Cvv, AnalysisKind::Msd];
    cfg.isolate_failures = true;
    let exec = Executor::new(cfg);
    let err = exec.run_all(Vec::new()).unwrap_err();
    assert_eq!(err.stage(), Some("cvv"));
    assert_eq!(line_count(&exec.config().output_path(AnalysisKind::Msd)), 4);
}

#[test]
fn run_all_reports_ragged_trajectory() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_inputs(input.path(), 3, true);
    let mut cfg = small_config(input.path(), output.path());
    cfg.n_particles = 4;
    cfg.n_active = 2;
    cfg.analyses = vec![AnalysisKind::Msd];
    let err = Executor::new(cfg).run_all(Vec::new()).unwrap_err();
    assert_eq!(err.stage(), Some("msd"));
    assert!(err.to_string().contains("shape error"));
}
