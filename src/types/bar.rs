/// One aggregate market observation, reduced to the two fields the
/// prediction pipeline consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub close: f64,
    pub volume: f64,
}
