use kickoff_core::LogoRef;
use kickoff_core::matches::{ImagePicker, PickRequest};
use log::{debug, warn};
use std::collections::VecDeque;
use std::path::Path;

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Answers pick requests from paths typed into the logo prompt, one per
/// request, in order. A missing, blank or unusable path counts as a cancel.
#[derive(Debug, Default)]
pub struct FilePicker {
    answers: VecDeque<Option<String>>,
}

impl FilePicker {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { answers: paths.into_iter().map(|p| Some(p.into())).collect() }
    }

    /// Every request is cancelled.
    pub fn cancelled() -> Self {
        Self::default()
    }
}

impl ImagePicker for FilePicker {
    fn pick_image(&mut self, request: &PickRequest) -> Option<LogoRef> {
        let answer = self.answers.pop_front().flatten()?;
        let path = answer.trim();
        if path.is_empty() {
            return None;
        }
        debug!("picking image {path} (crop {}:{})", request.aspect.0, request.aspect.1);
        logo_from_path(Path::new(path))
    }
}

fn logo_from_path(path: &Path) -> Option<LogoRef> {
    let is_image = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
    if !is_image {
        warn!("{} is not an image file", path.display());
        return None;
    }

    match path.canonicalize() {
        Ok(abs) if abs.is_file() => Some(LogoRef(format!("file://{}", abs.display()))),
        Ok(abs) => {
            warn!("{} is not a file", abs.display());
            None
        }
        Err(e) => {
            warn!("cannot use logo {}: {e}", path.display());
            None
        }
    }
}
