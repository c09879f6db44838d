pub use crate::ConfettiPlugin;

pub use crate::asset::{
    ConfettiAsset, ConfettiEmission, ConfettiMotion, ConfettiSprites, Range as ConfettiRange,
};

pub use crate::runtime::{
    Confetto, ConfettiAutostart, ConfettiEmitter, ConfettiMode, ConfettiOverlay, ConfettiRuntime,
    ConfettiViewport,
};
