//! Live NeoWs fetch with fail-safe fallback (browser only)

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::{FeedError, FeedSource, LoadedFeed, decode, fallback_objects, feed_url, process};
use crate::settings::Settings;
use crate::sim::CelestialObject;

/// Load the dataset for the radar. Always returns objects: offline mode and
/// any live failure yield the scripted fallback.
pub async fn fetch_objects(settings: &Settings, now_ms: i64) -> LoadedFeed {
    if !settings.live_feed {
        log::info!("Offline mode selected, using simulated feed");
        return LoadedFeed {
            objects: fallback_objects(now_ms, now_ms as u64),
            source: FeedSource::Simulated,
        };
    }

    log::info!("Fetching NeoWs feed...");
    match fetch_live(settings, now_ms).await {
        Ok(objects) => LoadedFeed {
            objects,
            source: FeedSource::Live,
        },
        Err(e) => {
            log::warn!("Live feed unavailable, switching to simulated feed: {}", e);
            LoadedFeed {
                objects: fallback_objects(now_ms, now_ms as u64),
                source: FeedSource::Fallback,
            }
        }
    }
}

async fn fetch_live(settings: &Settings, now_ms: i64) -> Result<Vec<CelestialObject>, FeedError> {
    let url = feed_url(now_ms, &settings.api_key);
    let text = get_text(&url).await?;
    let feed = decode(&text)?;
    if feed.element_count == 0 {
        return Err(FeedError::Empty);
    }
    process(&feed)
}

async fn get_text(url: &str) -> Result<String, FeedError> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request =
        Request::new_with_str_and_init(url, &opts).map_err(|e| FeedError::Http(format!("{e:?}")))?;
    let window = web_sys::window().ok_or_else(|| FeedError::Http("no window".to_string()))?;
    let resp_val = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| FeedError::Http(format!("fetch error: {e:?}")))?;
    let resp: Response = resp_val
        .dyn_into()
        .map_err(|_| FeedError::Http("not a Response".to_string()))?;

    if !resp.ok() {
        return Err(FeedError::Http(format!("HTTP {}", resp.status())));
    }

    let text = JsFuture::from(resp.text().map_err(|e| FeedError::Http(format!("{e:?}")))?)
        .await
        .map_err(|e| FeedError::Http(format!("{e:?}")))?;
    text.as_string()
        .ok_or_else(|| FeedError::Http("body is not text".to_string()))
}
