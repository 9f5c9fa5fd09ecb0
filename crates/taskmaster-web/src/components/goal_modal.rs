use taskmaster_core::Intent;
use taskmaster_core::goal::GoalForm;
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement
};
use yew::{
  Callback,
  Html,
  InputEvent,
  MouseEvent,
  NodeRef,
  Properties,
  SubmitEvent,
  TargetCast,
  function_component,
  html,
  use_state
};

use super::PrioritySelect;

#[derive(Properties, PartialEq)]
pub struct GoalModalProps {
  pub form:      GoalForm,
  pub on_intent: Callback<Intent>
}

/// Add/edit goal form. Category rides
/// along unchanged; progress is only
/// editable for existing goals.
#[function_component(GoalModal)]
pub fn goal_modal(
  props: &GoalModalProps
) -> Html {
  let title_ref = NodeRef::default();
  let description_ref =
    NodeRef::default();
  let priority_ref = NodeRef::default();
  let due_ref = NodeRef::default();
  let progress =
    use_state(|| props.form.progress);
  let editing = props.form.id.is_some();

  let on_progress = {
    let progress = progress.clone();
    Callback::from(
      move |event: InputEvent| {
        if let Some(value) = event
          .target_dyn_into::<HtmlInputElement>()
          .and_then(|input| {
            input.value().parse().ok()
          })
        {
          progress.set(value);
        }
      }
    )
  };

  let onsubmit = {
    let base = props.form.clone();
    let title_ref = title_ref.clone();
    let description_ref =
      description_ref.clone();
    let priority_ref =
      priority_ref.clone();
    let due_ref = due_ref.clone();
    let progress = progress.clone();
    let on_intent =
      props.on_intent.clone();
    Callback::from(
      move |event: SubmitEvent| {
        event.prevent_default();
        let form = GoalForm {
          id:          base.id,
          title:       title_ref
            .cast::<HtmlInputElement>()
            .map(|input| input.value())
            .unwrap_or_default(),
          description: description_ref
            .cast::<HtmlTextAreaElement>()
            .map(|area| area.value())
            .unwrap_or_default(),
          category:    base.category,
          priority:    priority_ref
            .cast::<HtmlSelectElement>()
            .and_then(|select| {
              select.value().parse().ok()
            })
            .unwrap_or(base.priority),
          due_date:    due_ref
            .cast::<HtmlInputElement>()
            .map(|input| input.value())
            .unwrap_or_default(),
          progress:    *progress
        };
        on_intent
          .emit(Intent::SaveGoal(form));
      }
    )
  };

  let close = {
    let on_intent =
      props.on_intent.clone();
    Callback::from(
      move |_: MouseEvent| {
        on_intent
          .emit(Intent::CloseModal)
      }
    )
  };

  let heading = if editing {
    "Edit Goal"
  } else {
    "Add New Goal"
  };
  let submit_label = if editing {
    "Update Goal"
  } else {
    "Save Goal"
  };

  html! {
      <div class="modal show" id="goalModal" onclick={close.clone()}>
          <div class="modal-content" onclick={|event: MouseEvent| event.stop_propagation()}>
              <div class="modal-header">
                  <h3 id="modalTitle">{ heading }</h3>
                  <button type="button" class="close-btn" onclick={close.clone()}>
                      <i class="fas fa-times"></i>
                  </button>
              </div>
              <form id="goalForm" {onsubmit}>
                  <input type="hidden" id="goalCategory" value={props.form.category.as_str()} />
                  <div class="form-group">
                      <label for="goalTitle">{ "Goal Title" }</label>
                      <input
                          ref={title_ref}
                          type="text"
                          id="goalTitle"
                          value={props.form.title.clone()}
                          autofocus=true
                      />
                  </div>
                  <div class="form-group">
                      <label for="goalDescription">{ "Description" }</label>
                      <textarea
                          ref={description_ref}
                          id="goalDescription"
                          rows="3"
                          value={props.form.description.clone()}
                      />
                  </div>
                  <div class="form-row">
                      <div class="form-group">
                          <label for="goalPriority">{ "Priority" }</label>
                          <PrioritySelect
                              node_ref={priority_ref}
                              id="goalPriority"
                              selected={props.form.priority}
                          />
                      </div>
                      <div class="form-group">
                          <label for="goalDueDate">{ "Due Date" }</label>
                          <input
                              ref={due_ref}
                              type="date"
                              id="goalDueDate"
                              value={props.form.due_date.clone()}
                          />
                      </div>
                  </div>
                  {
                      if editing {
                          html! {
                              <div class="form-group" id="progressGroup">
                                  <label for="goalProgress">{ "Progress" }</label>
                                  <div class="progress-input">
                                      <input
                                          type="range"
                                          id="goalProgress"
                                          min="0"
                                          max="100"
                                          value={progress.to_string()}
                                          oninput={on_progress}
                                      />
                                      <span id="progressValue">{ format!("{}%", *progress) }</span>
                                  </div>
                              </div>
                          }
                      } else {
                          html! {}
                      }
                  }
                  <div class="modal-actions">
                      <button type="button" class="cancel-btn" onclick={close}>{ "Cancel" }</button>
                      <button type="submit" class="save-btn">{ submit_label }</button>
                  </div>
              </form>
          </div>
      </div>
  }
}
