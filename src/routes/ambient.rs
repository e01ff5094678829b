//! `/api/ambient/*` and `/api/ui/resize`: the host's clock and visibility
//! signals. Timestamps are the page's `performance.now()` in `now=`.

use serde::Serialize;

use crate::ambient::scheduler::{AmbientTask, TaskId};
use crate::dashboard::state::{with_controller, with_controller_mut};
use crate::routes::util::{effects_response, get_millis, get_param, parse_form_body};

/// Handle POST /api/ambient/tick: body `now=...`.
pub fn handle_tick_post(body: &str) -> String {
    let now = get_millis(&parse_form_body(body), "now");
    effects_response(with_controller_mut(|c| c.tick(now)))
}

/// Handle POST /api/ambient/pause: page hidden.
pub fn handle_pause_post(body: &str) -> String {
    let now = get_millis(&parse_form_body(body), "now");
    effects_response(with_controller_mut(|c| c.pause(now)))
}

/// Handle POST /api/ambient/resume: page visible again.
pub fn handle_resume_post(body: &str) -> String {
    let now = get_millis(&parse_form_body(body), "now");
    effects_response(with_controller_mut(|c| c.resume(now)))
}

#[derive(Serialize)]
struct TaskEntry {
    id: TaskId,
    #[serde(flatten)]
    task: AmbientTask,
}

/// Handle GET /api/ambient/tasks: pending tasks with their ids.
pub fn handle_tasks_get(_query: &str) -> String {
    let entries: Vec<TaskEntry> = with_controller(|c| {
        c.ambient_tasks().into_iter().map(|(id, task)| TaskEntry { id, task }).collect()
    });
    serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string())
}

/// Handle POST /api/ambient/cancel: body `id=N`.
pub fn handle_cancel_post(body: &str) -> String {
    let params = parse_form_body(body);
    let Some(id) = get_param(&params, "id").and_then(|v| v.parse::<u32>().ok()) else {
        return "false".to_string();
    };
    with_controller_mut(|c| c.cancel_task(TaskId(id))).to_string()
}

/// Handle POST /api/ui/resize
pub fn handle_resize_post(_body: &str) -> String {
    effects_response(with_controller(|c| c.resized()))
}
