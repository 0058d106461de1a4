use sensorfeat_frame::Sample;

/// Receives every sample a feature decodes.
///
/// Called synchronously on the thread that delivered the raw frame, in
/// registration order. Implementations should return quickly.
pub trait SampleListener: Send + Sync {
    fn on_sample(&self, feature: &str, sample: &Sample);
}

impl<F> SampleListener for F
where
    F: Fn(&str, &Sample) + Send + Sync,
{
    fn on_sample(&self, feature: &str, sample: &Sample) {
        self(feature, sample)
    }
}
