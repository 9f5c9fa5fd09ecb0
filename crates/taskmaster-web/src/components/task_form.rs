use taskmaster_core::task::Priority;
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement
};
use yew::{
  Callback,
  Html,
  NodeRef,
  Properties,
  SubmitEvent,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  pub on_submit:
    Callback<(String, Priority)>
}

/// Title input plus priority select.
/// The input is cleared only when the
/// submitted title is non-blank.
#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  let title_ref = NodeRef::default();
  let priority_ref = NodeRef::default();

  let onsubmit = {
    let title_ref = title_ref.clone();
    let priority_ref =
      priority_ref.clone();
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |event: SubmitEvent| {
        event.prevent_default();
        let Some(input) = title_ref
          .cast::<HtmlInputElement>()
        else {
          return;
        };
        let priority = priority_ref
          .cast::<HtmlSelectElement>()
          .and_then(|select| {
            select.value().parse().ok()
          })
          .unwrap_or_default();

        let title = input.value();
        let accepted =
          !title.trim().is_empty();
        on_submit.emit((title, priority));
        if accepted {
          input.set_value("");
          if let Err(error) = input.focus()
          {
            tracing::debug!(
              ?error,
              "could not refocus task input"
            );
          }
        }
      }
    )
  };

  html! {
      <form class="task-form" id="taskForm" {onsubmit}>
          <div class="input-group">
              <input
                  ref={title_ref}
                  type="text"
                  id="taskInput"
                  class="task-input"
                  placeholder="What needs to be done?"
                  autocomplete="off"
              />
              <select ref={priority_ref} id="prioritySelect" class="priority-select">
                  {
                      for Priority::ALL.iter().map(|priority| html! {
                          <option
                              value={priority.as_str()}
                              selected={*priority == Priority::default()}
                          >
                              { format!("{} Priority", priority.label()) }
                          </option>
                      })
                  }
              </select>
              <button type="submit" class="add-btn">
                  <i class="fas fa-plus"></i>{ " Add Task" }
              </button>
          </div>
      </form>
  }
}
