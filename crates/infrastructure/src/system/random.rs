use geotxt_application::ports::AddressPicker;

/// Uniform random choice among resolved addresses.
pub struct FastrandPicker;

impl AddressPicker for FastrandPicker {
    fn pick(&self, count: usize) -> usize {
        fastrand::usize(..count)
    }
}
