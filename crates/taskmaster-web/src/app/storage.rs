use anyhow::{
  Context,
  anyhow
};
use taskmaster_core::KeyValueStore;
use wasm_bindgen::JsValue;

const PAGE_STORAGE_KEY: &str =
  "taskmaster-page";

/// Browser `localStorage` as a
/// key-value backend.
#[derive(Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
  fn storage(
    &self
  ) -> anyhow::Result<web_sys::Storage>
  {
    web_sys::window()
      .context("no window")?
      .local_storage()
      .map_err(js_error)?
      .context(
        "localStorage unavailable"
      )
  }
}

impl KeyValueStore for LocalStorage {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    self
      .storage()?
      .get_item(key)
      .map_err(js_error)
      .with_context(|| {
        format!("reading {key}")
      })
  }

  fn set(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    self
      .storage()?
      .set_item(key, value)
      .map_err(js_error)
      .with_context(|| {
        format!("writing {key}")
      })
  }

  fn remove(
    &self,
    key: &str
  ) -> anyhow::Result<()> {
    self
      .storage()?
      .remove_item(key)
      .map_err(js_error)
      .with_context(|| {
        format!("removing {key}")
      })
  }
}

fn js_error(
  value: JsValue
) -> anyhow::Error {
  anyhow!("{value:?}")
}

#[derive(
  Clone, Copy, Debug, PartialEq, Eq,
)]
pub enum Page {
  Tasks,
  Goals
}

impl Page {
  pub fn storage_value(
    self
  ) -> &'static str {
    match self {
      | Self::Tasks => "tasks",
      | Self::Goals => "goals"
    }
  }

  fn from_storage(
    stored: Option<&str>
  ) -> Self {
    match stored {
      | Some("goals") => Self::Goals,
      | _ => Self::Tasks
    }
  }
}

pub fn load_page() -> Page {
  let stored = LocalStorage
    .get(PAGE_STORAGE_KEY)
    .ok()
    .flatten();
  Page::from_storage(stored.as_deref())
}

pub fn save_page(page: Page) {
  if let Err(error) = LocalStorage.set(
    PAGE_STORAGE_KEY,
    page.storage_value()
  ) {
    tracing::warn!(
      %error,
      "failed saving selected page"
    );
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unknown_pages_fall_back_to_tasks() {
    assert_eq!(
      Page::from_storage(Some("goals")),
      Page::Goals
    );
    assert_eq!(
      Page::from_storage(Some("kanban")),
      Page::Tasks
    );
    assert_eq!(
      Page::from_storage(None),
      Page::Tasks
    );
  }

  #[test]
  fn stored_values_round_trip() {
    for page in [Page::Tasks, Page::Goals]
    {
      assert_eq!(
        Page::from_storage(Some(
          page.storage_value()
        )),
        page
      );
    }
  }
}
