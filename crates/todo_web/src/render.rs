//! Server-side HTML rendering for the task page.
//!
//! # Responsibility
//! - Render the full page: header, input form, task list, error banner.
//! - Ship the inline script that submits a task and re-fetches the list.
//!
//! # Invariants
//! - Task descriptions are always HTML-escaped.
//! - Position labels are 1-based and derived from list order, never stored.
//! - Server markup and the client-side item template come from the same helper.

use crate::routes::API_TODO_PATH;
use todo_core::Task;

pub const PAGE_TITLE: &str = "To-Do App";

/// Banner text shown when the store cannot be read at render time.
pub const LOAD_ERROR_MESSAGE: &str = "Tasks could not be loaded right now. Please try again.";

const EDIT_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" class="icon-svg" fill="none" viewBox="0 0 24 24" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M11 5H6a2 2 0 00-2 2v11a2 2 0 002 2h11a2 2 0 002-2v-5m-1.414-9.414a2 2 0 112.828 2.828L11.828 15H9v-2.828l8.586-8.586z"/></svg>"#;

const DELETE_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" class="icon-svg" fill="none" viewBox="0 0 24 24" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M19 7l-.867 12.142A2 2 0 0116.138 21H7.862a2 2 0 01-1.995-1.858L5 7m5 4v6m4-6v6m1-10V4a1 1 0 00-1-1h-4a1 1 0 00-1 1v3M4 7h16"/></svg>"#;

const STYLE: &str = r##"
body { margin: 0; min-height: 100vh; background: #6b7280; font-family: system-ui, sans-serif; }
nav { display: flex; justify-content: center; padding: 1rem; background: #4b5563; }
nav h1 { margin: 0; color: #fff; font-size: 1.5rem; }
.composer { display: flex; justify-content: center; margin-top: 2.5rem; }
.composer .card { background: #f9fafb; padding: 2rem; border-radius: 0.5rem; }
.composer h2 { margin: 0 0 1rem; text-align: center; font-size: 1rem; font-weight: normal; }
.composer .row { display: flex; gap: 0.5rem; padding: 0.5rem; background: #fff; border-radius: 0.375rem; }
.composer input { flex: 1; border: none; outline: none; background: #f1f5f9; color: #030712; }
.composer button { background: #22c55e; color: #fff; border: none; border-radius: 0.375rem; padding: 0.25rem 0.5rem; font-weight: 600; }
.error { max-width: 20rem; margin: 1rem auto 0; padding: 0.75rem; background: #fee2e2; color: #991b1b; border-radius: 0.375rem; }
#todo-list { list-style: none; padding: 0; margin: 0; }
.task { position: relative; width: 20rem; margin: 1.5rem auto 0; }
.task .position { position: absolute; left: -0.75rem; top: -0.75rem; display: flex; justify-content: center; align-items: center; width: 2rem; height: 2rem; border-radius: 9999px; background: #22c55e; color: #f9fafb; font-weight: bold; }
.task .description { margin: 0; background: #fff; padding: 2rem 3rem; border-radius: 0.5rem; color: #030712; overflow-wrap: anywhere; }
.task .actions { position: absolute; top: 0; right: 0; display: flex; gap: 0.25rem; padding: 0.75rem; }
.task .icon { background: none; border: none; padding: 0; cursor: not-allowed; opacity: 0.6; }
.icon-svg { width: 1.5rem; height: 1.5rem; }
"##;

// Submit, then clear, then re-fetch the whole list. No optimistic insert.
const SCRIPT: &str = r##"
(function () {
  var form = document.getElementById("todo-form");
  var input = document.getElementById("todo-input");
  var list = document.getElementById("todo-list");
  var banner = document.getElementById("error-banner");
  var template = document.getElementById("todo-item-template");
  var endpoint = form.dataset.endpoint;

  function showError(message) {
    banner.textContent = message;
    banner.hidden = false;
  }

  function renderTasks(tasks) {
    list.replaceChildren();
    tasks.forEach(function (task, index) {
      var item = template.content.firstElementChild.cloneNode(true);
      item.dataset.taskId = String(task.id);
      item.querySelector(".position").textContent = String(index + 1);
      item.querySelector(".description").textContent = task.description;
      list.appendChild(item);
    });
  }

  form.addEventListener("submit", async function (event) {
    event.preventDefault();
    try {
      var created = await fetch(endpoint, { method: "POST", body: JSON.stringify(input.value) });
      if (!created.ok) {
        var failure = await created.json().catch(function () { return {}; });
        throw new Error(failure.error || "The task could not be saved.");
      }
      input.value = "";
      var listed = await fetch(endpoint);
      if (!listed.ok) {
        throw new Error("Tasks could not be loaded right now. Please try again.");
      }
      renderTasks(await listed.json());
      banner.hidden = true;
    } catch (err) {
      showError(err.message);
    }
  });
})();
"##;

/// Renders the complete page for the given tasks.
///
/// When `error` is set the banner is visible and carries that message.
pub fn index_page(tasks: &[Task], error: Option<&str>) -> String {
    let mut html = String::with_capacity(4096 + tasks.len() * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{PAGE_TITLE}</title>\n"));
    html.push_str("<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str(&format!("<nav><h1>{PAGE_TITLE}</h1></nav>\n"));
    html.push_str(&format!(
        concat!(
            "<form id=\"todo-form\" class=\"composer\" data-endpoint=\"{endpoint}\">",
            "<div class=\"card\"><h2>Write Todo List</h2><div class=\"row\">",
            "<input id=\"todo-input\" type=\"text\" name=\"description\" ",
            "placeholder=\"Write here...\" autocomplete=\"off\">",
            "<button type=\"submit\">send</button>",
            "</div></div></form>\n"
        ),
        endpoint = API_TODO_PATH
    ));

    match error {
        Some(message) => html.push_str(&format!(
            "<div id=\"error-banner\" class=\"error\" role=\"alert\">{}</div>\n",
            escape_html(message)
        )),
        None => html.push_str(
            "<div id=\"error-banner\" class=\"error\" role=\"alert\" hidden></div>\n",
        ),
    }

    html.push_str("<ul id=\"todo-list\">");
    html.push_str(&task_list_html(tasks));
    html.push_str("</ul>\n");

    html.push_str("<template id=\"todo-item-template\">");
    html.push_str(&task_item_html("", "", ""));
    html.push_str("</template>\n");

    html.push_str("<script>");
    html.push_str(SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");
    html
}

/// Renders list items for `tasks`, labelled `1..=n` in order.
pub fn task_list_html(tasks: &[Task]) -> String {
    tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            task_item_html(
                &task.id.to_string(),
                &(index + 1).to_string(),
                &escape_html(&task.description),
            )
        })
        .collect()
}

fn task_item_html(task_id: &str, position: &str, description_html: &str) -> String {
    format!(
        concat!(
            "<li class=\"task\" data-task-id=\"{id}\">",
            "<span class=\"position\">{position}</span>",
            "<p class=\"description\">{description}</p>",
            "<span class=\"actions\">",
            "<button type=\"button\" class=\"icon\" disabled title=\"Editing is not supported\">{edit}</button>",
            "<button type=\"button\" class=\"icon\" disabled title=\"Deleting is not supported\">{delete}</button>",
            "</span></li>"
        ),
        id = task_id,
        position = position,
        description = description_html,
        edit = EDIT_ICON,
        delete = DELETE_ICON,
    )
}

/// Escapes text for safe inclusion in HTML element content and attributes.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
