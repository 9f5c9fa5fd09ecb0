use taskmaster_core::task::Priority;
use yew::{
  AttrValue,
  Html,
  NodeRef,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct PrioritySelectProps {
  pub node_ref: NodeRef,
  pub id:       AttrValue,
  pub selected: Priority
}

#[function_component(PrioritySelect)]
pub fn priority_select(
  props: &PrioritySelectProps
) -> Html {
  html! {
      <select ref={props.node_ref.clone()} id={props.id.clone()}>
          {
              for Priority::ALL.iter().map(|priority| html! {
                  <option
                      value={priority.as_str()}
                      selected={*priority == props.selected}
                  >
                      { priority.label() }
                  </option>
              })
          }
      </select>
  }
}
