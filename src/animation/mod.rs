pub(crate) mod anim;
pub(crate) mod easing;
pub(crate) mod kind;
pub(crate) mod particles;
pub(crate) mod renderers;
