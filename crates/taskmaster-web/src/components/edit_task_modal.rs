use taskmaster_core::Intent;
use taskmaster_core::task::Priority;
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement
};
use yew::{
  AttrValue,
  Callback,
  Html,
  MouseEvent,
  NodeRef,
  Properties,
  SubmitEvent,
  function_component,
  html
};

use super::PrioritySelect;

#[derive(Properties, PartialEq)]
pub struct EditTaskModalProps {
  pub id:        u64,
  pub title:     AttrValue,
  pub priority:  Priority,
  pub on_intent: Callback<Intent>
}

#[function_component(EditTaskModal)]
pub fn edit_task_modal(
  props: &EditTaskModalProps
) -> Html {
  let title_ref = NodeRef::default();
  let priority_ref = NodeRef::default();

  let onsubmit = {
    let id = props.id;
    let fallback = props.priority;
    let title_ref = title_ref.clone();
    let priority_ref =
      priority_ref.clone();
    let on_intent =
      props.on_intent.clone();
    Callback::from(
      move |event: SubmitEvent| {
        event.prevent_default();
        let title = title_ref
          .cast::<HtmlInputElement>()
          .map(|input| input.value())
          .unwrap_or_default();
        let priority = priority_ref
          .cast::<HtmlSelectElement>()
          .and_then(|select| {
            select.value().parse().ok()
          })
          .unwrap_or(fallback);
        on_intent.emit(
          Intent::SaveTaskEdit {
            id,
            title,
            priority
          }
        );
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

  html! {
      <div class="modal show" id="editModal" onclick={close.clone()}>
          <div class="modal-content" onclick={|event: MouseEvent| event.stop_propagation()}>
              <div class="modal-header">
                  <h3>{ "Edit Task" }</h3>
                  <button type="button" class="close-btn" onclick={close.clone()}>
                      <i class="fas fa-times"></i>
                  </button>
              </div>
              <form id="editForm" {onsubmit}>
                  <div class="form-group">
                      <label for="editTaskInput">{ "Task Title" }</label>
                      <input
                          ref={title_ref}
                          type="text"
                          id="editTaskInput"
                          value={props.title.clone()}
                          autofocus=true
                      />
                  </div>
                  <div class="form-group">
                      <label for="editPrioritySelect">{ "Priority" }</label>
                      <PrioritySelect
                          node_ref={priority_ref}
                          id="editPrioritySelect"
                          selected={props.priority}
                      />
                  </div>
                  <div class="modal-actions">
                      <button type="button" class="cancel-btn" onclick={close}>{ "Cancel" }</button>
                      <button type="submit" class="save-btn">{ "Save Changes" }</button>
                  </div>
              </form>
          </div>
      </div>
  }
}
