pub mod browser;
pub mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use taskmaster_core::goal::GoalCategory;
use taskmaster_core::task::Priority;
use taskmaster_core::{
  Config,
  Intent,
  Modal,
  Workspace,
  open_workspace
};
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::{
  AttrValue,
  Callback,
  Html,
  MouseEvent,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_mut_ref,
  use_state
};

use crate::components::{
  EditTaskModal,
  GoalModal,
  MarkupSurface,
  PageTabs,
  SearchBar,
  TaskForm
};
use storage::{
  LocalStorage,
  Page
};

const EMBEDDED_CONFIG: &str =
  include_str!("../taskmaster.toml");

fn load_config() -> Config {
  let mut cfg =
    match Config::from_toml_str(
      EMBEDDED_CONFIG
    ) {
      | Ok(cfg) => cfg,
      | Err(error) => {
        tracing::error!(
          %error,
          "embedded config rejected; \
           using defaults"
        );
        Config::default()
      }
    };

  if let Some(zone) =
    browser::detect_timezone()
  {
    cfg.apply_overrides([(
      "display.timezone".to_string(),
      zone
    )]);
  }
  cfg
}

fn markup(raw: String) -> AttrValue {
  AttrValue::from(raw)
}

#[function_component(App)]
pub fn app() -> Html {
  let workspace: Rc<RefCell<Workspace>> =
    use_mut_ref(|| {
      open_workspace(
        Rc::new(LocalStorage),
        load_config()
      )
    });
  let trigger = use_force_update();
  let page = use_state(storage::load_page);

  {
    let workspace = workspace.clone();
    use_effect_with((), move |_| {
      let script = workspace
        .borrow()
        .config()
        .service_worker();
      if let Some(script) = script {
        browser::register_service_worker(
          script
        );
      }
      || ()
    });
  }

  let dispatch = {
    let workspace = workspace.clone();
    let trigger = trigger.clone();
    Callback::from(
      move |intent: Intent| {
        let (notice, hold_ms) = {
          let mut ws =
            workspace.borrow_mut();
          let notice = ws.handle(
            intent,
            &browser::confirm_dialog
          );
          (
            notice,
            ws.config().notice_hold_ms()
          )
        };

        if let Some(notice) = notice {
          let workspace =
            workspace.clone();
          let trigger = trigger.clone();
          Timeout::new(hold_ms, move || {
            if workspace
              .borrow_mut()
              .dismiss_notice(notice.id)
            {
              trigger.force_update();
            }
          })
          .forget();
        }
        trigger.force_update();
      }
    )
  };

  {
    let dispatch = dispatch.clone();
    use_effect_with((), move |_| {
      let listener = web_sys::window()
        .and_then(|window| {
          window.document()
        })
        .map(|document| {
          EventListener::new(
            &document,
            "keydown",
            move |event| {
              let escape = event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|key| {
                  key.key() == "Escape"
                });
              if escape {
                dispatch
                  .emit(Intent::CloseModal);
              }
            }
          )
        });
      move || drop(listener)
    });
  }

  let on_select_page = {
    let page = page.clone();
    Callback::from(move |next: Page| {
      storage::save_page(next);
      page.set(next);
    })
  };

  let ws = workspace.borrow();
  let body = match *page {
    | Page::Tasks => {
      tasks_page(&ws, &dispatch)
    }
    | Page::Goals => {
      goals_page(&ws, &dispatch)
    }
  };
  let modal = match ws.modal() {
    | Some(Modal::EditTask {
      id,
      title,
      priority
    }) => {
      html! {
          <EditTaskModal
              key={format!("task-{id}")}
              id={*id}
              title={title.clone()}
              priority={*priority}
              on_intent={dispatch.clone()}
          />
      }
    }
    | Some(Modal::Goal(form)) => {
      let key = match form.id {
        | Some(id) => format!("goal-{id}"),
        | None => {
          format!(
            "goal-new-{}",
            form.category
          )
        }
      };
      html! {
          <GoalModal
              key={key}
              form={form.clone()}
              on_intent={dispatch.clone()}
          />
      }
    }
    | None => html! {}
  };

  html! {
      <div class="container">
          <header class="header">
              <div class="header-content">
                  <h1><i class="fas fa-check-circle"></i>{ " TaskMaster" }</h1>
                  <PageTabs active={*page} on_select={on_select_page} />
              </div>
          </header>
          { body }
          { modal }
          <MarkupSurface
              class="notifications"
              id={AttrValue::from("notifications")}
              markup={markup(ws.notices_markup())}
              on_intent={dispatch.clone()}
          />
      </div>
  }
}

fn tasks_page(
  ws: &Workspace,
  dispatch: &Callback<Intent>
) -> Html {
  let on_submit = {
    let dispatch = dispatch.clone();
    Callback::from(
      move |(title, priority): (
        String,
        Priority
      )| {
        dispatch.emit(
          Intent::SubmitNewTask {
            title,
            priority
          }
        );
      }
    )
  };
  let on_search = {
    let dispatch = dispatch.clone();
    Callback::from(
      move |term: String| {
        dispatch
          .emit(Intent::Search(term));
      }
    )
  };

  html! {
      <main class="main-content">
          <section class="task-input-section">
              <TaskForm {on_submit} />
          </section>
          <section class="filter-section">
              <MarkupSurface
                  class="filter-buttons"
                  markup={markup(ws.filter_bar_markup())}
                  on_intent={dispatch.clone()}
              />
              <SearchBar {on_search} />
          </section>
          <div class="content-grid">
              <section class="tasks-section">
                  <div class="section-header">
                      <h2>{ "Tasks" }</h2>
                  </div>
                  <MarkupSurface
                      class="task-list"
                      id={AttrValue::from("taskList")}
                      markup={markup(ws.task_list_markup())}
                      on_intent={dispatch.clone()}
                  />
              </section>
              <aside class="sidebar">
                  <section class="summary-card">
                      <h3>{ "Summary" }</h3>
                      <MarkupSurface
                          class="summary-grid"
                          markup={markup(ws.task_summary_markup())}
                          on_intent={dispatch.clone()}
                      />
                  </section>
                  <section class="activity-card">
                      <h3>{ "Recent Activity" }</h3>
                      <MarkupSurface
                          class="activity-list"
                          id={AttrValue::from("activityList")}
                          markup={markup(ws.activity_markup())}
                          on_intent={dispatch.clone()}
                      />
                  </section>
              </aside>
          </div>
      </main>
  }
}

fn goals_page(
  ws: &Workspace,
  dispatch: &Callback<Intent>
) -> Html {
  let current =
    ws.goals().current_category();

  html! {
      <main class="main-content">
          <MarkupSurface
              class="goal-tabs"
              markup={markup(ws.goal_tabs_markup())}
              on_intent={dispatch.clone()}
          />
          {
              for GoalCategory::ALL.iter().map(|category| {
                  let class = if *category == current {
                      "goal-category active"
                  } else {
                      "goal-category"
                  };
                  let on_add = {
                      let dispatch = dispatch.clone();
                      let category = *category;
                      Callback::from(move |_: MouseEvent| {
                          dispatch.emit(Intent::AddGoal(category));
                      })
                  };
                  html! {
                      <section class={class} id={format!("{}-goals", category.as_str())}>
                          <div class="category-header">
                              <h2>{ category.label() }</h2>
                              <button class="add-goal-btn" onclick={on_add}>
                                  <i class="fas fa-plus"></i>{ " Add Goal" }
                              </button>
                          </div>
                          <MarkupSurface
                              class="goals-grid"
                              markup={markup(ws.goal_list_markup(*category))}
                              on_intent={dispatch.clone()}
                          />
                      </section>
                  }
              })
          }
      </main>
  }
}
