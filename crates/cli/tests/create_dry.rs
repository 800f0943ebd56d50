use assert_cmd::cargo::cargo_bin_cmd;

fn base_args() -> Vec<String> {
    vec![
        "create".into(),
        "--dry-run".into(),
        "--title".into(),
        "Community well".into(),
        "--description".into(),
        "A well for the village".into(),
        "--category".into(),
        "Infrastructure".into(),
        "--goal".into(),
        "100".into(),
        "--duration".into(),
        "30".into(),
        "--beneficiaries".into(),
        "Village of Aral".into(),
        "--proof-of-work".into(),
        "Weekly photo reports".into(),
    ]
}

#[test]
fn dry_run_encodes_milestones_in_ledger_units() {
    let mut args = base_args();
    args.extend([
        "--milestone".into(),
        "A=40".into(),
        "--milestone".into(),
        "B=60".into(),
    ]);

    let output = cargo_bin_cmd!("goalpost-cli")
        .args(&args)
        .output()
        .expect("run create --dry-run");
    assert!(
        output.status.success(),
        "dry run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("goal_units=100000000000000000000"));
    assert!(stdout.contains("milestone name=A target_units=40000000000000000000"));
    assert!(stdout.contains("milestone name=B target_units=60000000000000000000"));
    assert!(stdout.contains("dry run: transaction not sent"));
}

#[test]
fn dry_run_rejects_milestones_past_the_goal() {
    let mut args = base_args();
    args.extend([
        "--milestone".into(),
        "A=40".into(),
        "--milestone".into(),
        "B=60.01".into(),
    ]);

    let output = cargo_bin_cmd!("goalpost-cli")
        .args(&args)
        .output()
        .expect("run create --dry-run");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("milestones"),
        "stderr missing flagged field: {stderr}"
    );
}
