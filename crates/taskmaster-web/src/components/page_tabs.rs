use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use crate::app::storage::Page;

#[derive(Properties, PartialEq)]
pub struct PageTabsProps {
  pub active:    Page,
  pub on_select: Callback<Page>
}

#[function_component(PageTabs)]
pub fn page_tabs(
  props: &PageTabsProps
) -> Html {
  let tab = |page: Page,
             icon: &'static str,
             label: &'static str| {
    let on_select =
      props.on_select.clone();
    let class = if props.active == page
    {
      "nav-link active"
    } else {
      "nav-link"
    };
    html! {
        <button class={class} onclick={move |_| on_select.emit(page)}>
            <i class={format!("fas {icon}")}></i>
            { format!(" {label}") }
        </button>
    }
  };

  html! {
      <nav class="nav-links">
          { tab(Page::Tasks, "fa-tasks", "Tasks") }
          { tab(Page::Goals, "fa-bullseye", "Goals") }
      </nav>
  }
}
