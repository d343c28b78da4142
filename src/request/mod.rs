mod descriptor;
mod method;

pub use descriptor::RequestDescriptor;
pub use method::Method;
