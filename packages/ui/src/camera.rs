//! Browser camera over the JavaScript bridge.
//!
//! Streams are kept in `window.__reliveryStreams` under a key; Rust only holds
//! the key. [`JsStream::stop`] stops every track and detaches the stream from
//! the preview element.

use dioxus::prelude::*;
use serde::Deserialize;
use store::camera::{CameraDevice, CameraError, CameraPanel, CameraStream, FacingMode};

use crate::bridge::js_string_escape;

#[derive(Debug, Deserialize)]
struct AcquireReply {
    status: String,
    key: Option<String>,
    message: Option<String>,
}

/// Camera that previews into the `<video>` element with id `video_id`.
#[derive(Clone, Debug)]
pub struct JsCamera {
    video_id: String,
}

impl JsCamera {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
        }
    }
}

impl CameraDevice for JsCamera {
    type Stream = JsStream;

    async fn acquire(&self, facing: FacingMode) -> Result<JsStream, CameraError> {
        let js = format!(
            r#"
            (async () => {{
                const md = navigator.mediaDevices;
                if (!md || !md.getUserMedia) {{ dioxus.send({{ status: "unsupported" }}); return; }}
                let stream;
                try {{
                    stream = await md.getUserMedia({{ video: {{ facingMode: {facing_js} }} }});
                }} catch (e) {{
                    const denied = e && (e.name === "NotAllowedError" || e.name === "SecurityError");
                    dioxus.send({{ status: denied ? "denied" : "error", message: String(e) }});
                    return;
                }}
                const video = document.getElementById({video_js});
                if (!video || !video.isConnected) {{
                    stream.getTracks().forEach(t => t.stop());
                    dioxus.send({{ status: "error", message: "preview element gone" }});
                    return;
                }}
                window.__reliveryStreams = window.__reliveryStreams || {{}};
                const key = "s" + Date.now().toString(36) + Math.random().toString(36).slice(2);
                window.__reliveryStreams[key] = stream;
                video.srcObject = stream;
                dioxus.send({{ status: "live", key: key }});
            }})();
            "#,
            facing_js = js_string_escape(facing.as_str()),
            video_js = js_string_escape(&self.video_id),
        );

        let mut eval = document::eval(&js);
        let reply = eval
            .recv::<AcquireReply>()
            .await
            .map_err(|e| CameraError::Bridge(e.to_string()))?;
        match (reply.status.as_str(), reply.key) {
            ("live", Some(key)) => Ok(JsStream {
                key,
                video_id: self.video_id.clone(),
            }),
            ("unsupported", _) => Err(CameraError::Unsupported),
            ("denied", _) => Err(CameraError::PermissionDenied),
            _ => Err(CameraError::Bridge(reply.message.unwrap_or_default())),
        }
    }
}

#[derive(Debug)]
pub struct JsStream {
    key: String,
    video_id: String,
}

impl CameraStream for JsStream {
    fn stop(&mut self) {
        let js = format!(
            r#"
            const streams = window.__reliveryStreams || {{}};
            const stream = streams[{key_js}];
            if (stream) {{
                stream.getTracks().forEach(t => t.stop());
                delete streams[{key_js}];
            }}
            const video = document.getElementById({video_js});
            if (video) {{ video.srcObject = null; }}
            "#,
            key_js = js_string_escape(&self.key),
            video_js = js_string_escape(&self.video_id),
        );
        document::eval(&js);
    }
}

/// Grabs the current preview frame as a PNG `data:` URL. `None` when the
/// preview has no frame yet.
pub async fn capture_frame(video_id: &str) -> Option<String> {
    let js = format!(
        r#"
        const video = document.getElementById({video_js});
        if (!video || !video.videoWidth) {{ dioxus.send(""); return; }}
        const canvas = document.createElement("canvas");
        canvas.width = video.videoWidth;
        canvas.height = video.videoHeight;
        canvas.getContext("2d").drawImage(video, 0, 0, canvas.width, canvas.height);
        dioxus.send(canvas.toDataURL("image/png"));
        "#,
        video_js = js_string_escape(video_id),
    );
    let mut eval = document::eval(&js);
    match eval.recv::<String>().await {
        Ok(url) if !url.is_empty() => Some(url),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("frame capture failed: {e}");
            None
        }
    }
}

/// A file picked in an `<input type="file">`.
#[derive(Debug, Deserialize)]
pub struct PickedFile {
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub data: String,
}

/// Reads the first file of the input with id `input_id` as a `data:` URL.
pub async fn read_picked_file(input_id: &str) -> Option<PickedFile> {
    let js = format!(
        r#"
        const input = document.getElementById({input_js});
        const file = input && input.files && input.files[0];
        if (!file) {{ dioxus.send(null); return; }}
        const reader = new FileReader();
        reader.onloadend = () => dioxus.send({{ name: file.name, type: file.type, data: String(reader.result || "") }});
        reader.readAsDataURL(file);
        "#,
        input_js = js_string_escape(input_id),
    );
    let mut eval = document::eval(&js);
    match eval.recv::<Option<PickedFile>>().await {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!("reading picked file failed: {e}");
            None
        }
    }
}

/// A camera panel scoped to the calling component: every stream is stopped
/// when the component unmounts.
pub fn use_camera_panel() -> Signal<CameraPanel<JsStream>> {
    let mut panel = use_signal(CameraPanel::<JsStream>::new);
    use_drop(move || {
        if let Ok(mut panel) = panel.try_write() {
            panel.close();
        }
    });
    panel
}

/// Shows or hides the panel. Showing requests the back camera.
pub fn toggle_camera(mut panel: Signal<CameraPanel<JsStream>>, video_id: &'static str) {
    if panel.read().status().is_visible() {
        panel.write().close();
        return;
    }
    let Some(ticket) = panel.write().open() else {
        return;
    };
    spawn(async move {
        let result = JsCamera::new(video_id).acquire(FacingMode::Environment).await;
        panel.write().attach(ticket, result);
    });
}
