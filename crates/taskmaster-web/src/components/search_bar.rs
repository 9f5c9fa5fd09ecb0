use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  InputEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct SearchBarProps {
  pub on_search: Callback<String>
}

#[function_component(SearchBar)]
pub fn search_bar(
  props: &SearchBarProps
) -> Html {
  let oninput = {
    let on_search =
      props.on_search.clone();
    Callback::from(
      move |event: InputEvent| {
        if let Some(input) = event
          .target_dyn_into::<HtmlInputElement>()
        {
          on_search.emit(input.value());
        }
      }
    )
  };

  html! {
      <div class="search-box">
          <i class="fas fa-search"></i>
          <input
              type="text"
              id="searchInput"
              placeholder="Search tasks..."
              {oninput}
          />
      </div>
  }
}
