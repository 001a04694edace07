pub mod first_order;
pub mod itu_r_1411;
pub mod model;
pub mod sight;
pub mod zone;
