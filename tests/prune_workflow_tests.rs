use anyhow::Result;
use ctrprune::domain::ContainerState;
use ctrprune::services::{CONFIRM_PROMPT, PruneOptions, PruneService, REPORT_HEADER};
use ctrprune::test_support::{MockFailure, MockRuntime};
use std::io::Cursor;
use std::sync::Arc;

fn create_service() -> (PruneService, Arc<MockRuntime>) {
    let mock = Arc::new(MockRuntime::new());
    let service = PruneService::new(mock.clone());
    (service, mock)
}

fn options(force: bool) -> PruneOptions {
    PruneOptions {
        force,
        namespace: "default".into(),
    }
}

#[test]
fn test_workflow_force_with_running_container() -> Result<()> {
    let (service, mock) = create_service();
    mock.add_container("c1", ContainerState::Stopped);
    mock.add_container("c2", ContainerState::Running);
    mock.add_container("c3", ContainerState::Stopped);

    let mut output = Vec::new();
    let report = service
        .run(&options(true), &mut Cursor::new(""), &mut output)?
        .expect("forced prune runs");

    assert_eq!(report.deleted, vec!["c1".to_string(), "c3".to_string()]);
    assert_eq!(
        String::from_utf8(output)?,
        format!("{REPORT_HEADER}\nc1\nc3\n")
    );
    assert_eq!(mock.container_ids(), vec!["c2".to_string()]);

    Ok(())
}

#[test]
fn test_workflow_declined() -> Result<()> {
    let (service, mock) = create_service();
    mock.add_container("c1", ContainerState::Stopped);

    let mut output = Vec::new();
    let report = service.run(&options(false), &mut Cursor::new("n\n"), &mut output)?;

    assert!(report.is_none());
    assert_eq!(String::from_utf8(output)?, CONFIRM_PROMPT);
    assert!(mock.get_commands().is_empty());

    Ok(())
}

#[test]
fn test_workflow_list_failure_after_confirmation() {
    let (service, mock) = create_service();
    mock.add_container("c1", ContainerState::Stopped);
    mock.set_fail_on("list");

    let mut output = Vec::new();
    let result = service.run(&options(false), &mut Cursor::new("y\n"), &mut output);

    assert!(result.is_err());
    // Only the prompt was written
    assert_eq!(String::from_utf8(output).unwrap(), CONFIRM_PROMPT);
    assert!(
        !mock
            .get_commands()
            .iter()
            .any(|c| c.starts_with("remove:"))
    );
}

#[test]
fn test_workflow_deleted_set_matches_successful_removals() -> Result<()> {
    let (service, mock) = create_service();
    let ids = ["a", "b", "c", "d", "e", "f"];
    for id in ids {
        mock.add_container(id, ContainerState::Stopped);
    }
    mock.fail_remove("b", MockFailure::Status);
    mock.fail_remove("d", MockFailure::Unexpected);
    mock.fail_remove("e", MockFailure::Status);

    let report = service.prune("default")?;

    assert_eq!(
        report.deleted,
        vec!["a".to_string(), "c".to_string(), "f".to_string()]
    );
    assert_eq!(report.skipped, vec!["b".to_string(), "e".to_string()]);
    assert_eq!(report.failed, vec!["d".to_string()]);

    // Every enumerated container was attempted exactly once, in order
    let removals: Vec<String> = mock
        .get_commands()
        .into_iter()
        .filter(|c| c.starts_with("remove:"))
        .collect();
    assert_eq!(removals.len(), ids.len());
    for (cmd, id) in removals.iter().zip(ids) {
        assert!(cmd.starts_with(&format!("remove:{id}:")), "{cmd}");
    }

    Ok(())
}

#[test]
fn test_workflow_second_prune_is_empty() -> Result<()> {
    let (service, mock) = create_service();
    mock.add_container("c1", ContainerState::Stopped);
    mock.add_container("c2", ContainerState::Paused);

    let first = service.prune("default")?;
    let second = service.prune("default")?;

    assert_eq!(first.deleted, vec!["c1".to_string()]);
    assert!(second.deleted.is_empty());
    assert_eq!(second.skipped, vec!["c2".to_string()]);

    Ok(())
}
