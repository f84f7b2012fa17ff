pub mod lifecycle;
pub mod math;
pub mod tolerance;
pub mod validation;
