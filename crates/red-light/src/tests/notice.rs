use crate::Notice;

use red_light_core::StartRefusal;

/// WHAT: Each start refusal maps to its own notice
/// WHY: The user must learn exactly which precondition is missing
#[test]
fn given_refusal_when_mapping_then_matching_notice() {
    // Given/When/Then: Missing key and missing task notices differ
    assert_eq!(
        Notice::for_refusal(StartRefusal::MissingApiKey),
        Notice::ApiKeyMissing
    );
    assert_eq!(
        Notice::for_refusal(StartRefusal::MissingTask),
        Notice::TaskMissing
    );
}

/// WHAT: The off-task alert names the declared task
/// WHY: The alert is only useful if it reminds the user what to do
#[test]
fn given_off_task_notice_when_rendering_then_mentions_task() {
    // Given: An off-task notice
    let notice = Notice::OffTask {
        task: "write report".to_string(),
    };

    // When: Rendering
    let (title, subtitle, message) = (notice.title(), notice.subtitle(), notice.message());

    // Then: Text matches the focus alert wording
    assert_eq!(title, "Focus Alert");
    assert_eq!(subtitle, "You appear to be off task");
    assert_eq!(message, "Remember your focus: write report");
}

/// WHAT: Refusal notices point to the menu item that fixes them
/// WHY: Users need to know where to go next
#[test]
fn given_refusal_notices_when_rendering_then_point_to_menu() {
    // Given/When: Rendering both refusal notices
    let key = Notice::ApiKeyMissing.message();
    let task = Notice::TaskMissing.message();

    // Then: Each names its menu item
    assert!(key.contains("Set API Key"));
    assert!(task.contains("Set Task"));
}

/// WHAT: The task-saved notice echoes the new task
/// WHY: Confirms to the user what is being monitored
#[test]
fn given_task_saved_notice_when_rendering_then_echoes_task() {
    // Given: A task-saved notice
    let notice = Notice::TaskSaved {
        task: "deep work".to_string(),
    };

    // When/Then: The message includes the task
    assert_eq!(notice.title(), "Task Updated");
    assert_eq!(notice.message(), "Now monitoring: deep work");
}
