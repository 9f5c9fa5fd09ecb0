use taskmaster_core::Intent;
use yew::{
  AttrValue,
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

use crate::app::browser::intent_from_click;

#[derive(Properties, PartialEq)]
pub struct MarkupSurfaceProps {
  pub class:     AttrValue,
  #[prop_or_default]
  pub id:        Option<AttrValue>,
  pub markup:    AttrValue,
  pub on_intent: Callback<Intent>
}

/// Pre-rendered markup with one
/// delegated click handler for every
/// `data-intent` element inside it.
#[function_component(MarkupSurface)]
pub fn markup_surface(
  props: &MarkupSurfaceProps
) -> Html {
  let onclick = {
    let on_intent =
      props.on_intent.clone();
    Callback::from(
      move |event: MouseEvent| {
        if let Some(intent) =
          intent_from_click(&event)
        {
          event.prevent_default();
          on_intent.emit(intent);
        }
      }
    )
  };

  html! {
      <div class={props.class.clone()} id={props.id.clone()} {onclick}>
          { Html::from_html_unchecked(props.markup.clone()) }
      </div>
  }
}
