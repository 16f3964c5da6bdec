use sha2::{Digest as _, Sha256};

use crate::foundation::error::{IntroError, IntroResult};
use crate::scene::model::FrameScene;

/// Content hash of everything in a scene that affects pixels.
///
/// Frame index and premount hints are excluded, so two frames that draw the same picture share a
/// fingerprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SceneFingerprint(pub [u8; 32]);

impl SceneFingerprint {
    /// Lowercase hex form.
    pub fn to_hex(self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// Fingerprint `scene`.
pub fn fingerprint_scene(scene: &FrameScene) -> IntroResult<SceneFingerprint> {
    let bytes = serde_json::to_vec(&(&scene.canvas, &scene.layers))
        .map_err(|e| IntroError::serde(format!("serialize scene for fingerprint: {e}")))?;
    Ok(SceneFingerprint(Sha256::digest(&bytes).into()))
}
