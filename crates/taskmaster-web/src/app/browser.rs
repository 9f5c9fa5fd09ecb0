use js_sys::{
  Array,
  Object,
  Reflect
};
use taskmaster_core::Intent;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{
  JsFuture,
  spawn_local
};
use web_sys::Element;
use yew::{
  MouseEvent,
  TargetCast
};

/// Blocking `window.confirm`; a
/// missing window reads as "no".
pub fn confirm_dialog(
  message: &str
) -> bool {
  web_sys::window()
    .and_then(|window| {
      window
        .confirm_with_message(message)
        .ok()
    })
    .unwrap_or(false)
}

/// Resolves a delegated click to the
/// intent named by the nearest
/// `data-intent` ancestor.
pub fn intent_from_click(
  event: &MouseEvent
) -> Option<Intent> {
  let target = event
    .target_dyn_into::<Element>()?;
  let source = target
    .closest("[data-intent]")
    .ok()
    .flatten()?;
  let raw = source
    .get_attribute("data-intent")?;

  match raw.parse::<Intent>() {
    | Ok(intent) => Some(intent),
    | Err(error) => {
      tracing::warn!(
        raw,
        %error,
        "ignoring unknown click intent"
      );
      None
    }
  }
}

/// IANA zone the browser formats
/// dates in, when it reports one.
pub fn detect_timezone()
-> Option<String> {
  let format =
    js_sys::Intl::DateTimeFormat::new(
      &Array::new(),
      &Object::new()
    );
  Reflect::get(
    &format.resolved_options(),
    &JsValue::from_str("timeZone")
  )
  .ok()
  .and_then(|zone| zone.as_string())
  .filter(|zone| !zone.is_empty())
}

/// Best-effort offline registration.
/// Failures are logged and otherwise
/// ignored.
pub fn register_service_worker(
  script: String
) {
  let Some(navigator) = web_sys::window()
    .map(|window| window.navigator())
  else {
    return;
  };

  let supported = Reflect::has(
    &navigator,
    &JsValue::from_str("serviceWorker")
  )
  .unwrap_or(false);
  if !supported {
    tracing::info!(
      "service workers unsupported; \
       running online only"
    );
    return;
  }

  let promise = navigator
    .service_worker()
    .register(&script);
  spawn_local(async move {
    match JsFuture::from(promise).await
    {
      | Ok(_) => {
        tracing::info!(
          script,
          "service worker registered"
        );
      }
      | Err(error) => {
        tracing::warn!(
          script,
          ?error,
          "service worker registration \
           failed"
        );
      }
    }
  });
}
