// implemented by components that hold subscriptions or timer sources forming
// reference cycles; destroy breaks the chain on window close
pub trait Destroyable {
    fn destroy(&mut self);
}
