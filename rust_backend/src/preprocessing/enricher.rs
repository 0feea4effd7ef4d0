use crate::algorithms::derive_gamma_column;
use crate::config::WaveSettings;
use crate::core::{ObservationSet, SeaComponent};
use crate::error::MetoceanResult;

/// Adds derived peak enhancement columns to a joined dataset.
pub struct GammaEnricher<'a> {
    settings: &'a WaveSettings,
}

impl<'a> GammaEnricher<'a> {
    pub fn new(settings: &'a WaveSettings) -> Self {
        Self { settings }
    }

    /// Whether the settings ask for derivation (no measured gamma supplied).
    pub fn is_required(&self) -> bool {
        !self.settings.peak_enhancement && self.settings.derive_peak_enhancement
    }

    /// Derive `G` from `Hs`/`Tp`, and for spectral data `G_W` from the
    /// wind-sea pair and a constant `G_S`.
    ///
    /// Does nothing unless [`is_required`](Self::is_required).
    pub fn enrich(&self, observations: &mut ObservationSet) -> MetoceanResult<()> {
        if !self.is_required() {
            return Ok(());
        }

        let total = Self::derive(observations, SeaComponent::Total)?;
        observations.insert_column(SeaComponent::Total.gamma(), total)?;
        log::debug!("Derived {} from Hs and Tp", SeaComponent::Total.gamma());

        if self.settings.spectral {
            let wind = Self::derive(observations, SeaComponent::WindSea)?;
            observations.insert_column(SeaComponent::WindSea.gamma(), wind)?;

            let swell = vec![self.settings.swell_peak_enhancement; observations.height()];
            observations.insert_column(SeaComponent::Swell.gamma(), swell)?;
            log::debug!(
                "Derived wind-sea gamma; swell gamma fixed at {}",
                self.settings.swell_peak_enhancement
            );
        }
        Ok(())
    }

    fn derive(observations: &ObservationSet, component: SeaComponent) -> MetoceanResult<Vec<f64>> {
        let hs = observations.column(component.hs())?;
        let tp = observations.column(component.tp())?;
        derive_gamma_column(hs, tp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Variable;
    use crate::error::MetoceanError;

    fn wave(spectral: bool, measured: bool, derive: bool) -> WaveSettings {
        let mut settings = WaveSettings::new(0.5, 1.0, 12);
        settings.spectral = spectral;
        settings.peak_enhancement = measured;
        settings.derive_peak_enhancement = derive;
        settings
    }

    fn observations() -> ObservationSet {
        ObservationSet::with_hourly_index(vec![
            (Variable::Hs, vec![4.0, 1.0]),
            (Variable::Tp, vec![4.0, 6.0]),
            (Variable::HsWind, vec![1.0, 1.0]),
            (Variable::TpWind, vec![2.0, 5.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_derives_total_gamma() {
        let mut data = observations();
        GammaEnricher::new(&wave(false, false, true))
            .enrich(&mut data)
            .unwrap();
        assert_eq!(data.column(Variable::Gamma).unwrap(), &[5.0, 1.0]);
        assert!(!data.has_column(Variable::GammaWind));
    }

    #[test]
    fn test_spectral_components() {
        let mut data = observations();
        GammaEnricher::new(&wave(true, false, true))
            .enrich(&mut data)
            .unwrap();
        assert_eq!(data.column(Variable::GammaWind).unwrap(), &[5.0, 1.0]);
        assert_eq!(data.column(Variable::GammaSwell).unwrap(), &[10.0, 10.0]);
    }

    #[test]
    fn test_measured_gamma_is_not_overwritten() {
        let mut data = observations();
        let settings = wave(false, true, true);
        let enricher = GammaEnricher::new(&settings);
        assert!(!enricher.is_required());
        enricher.enrich(&mut data).unwrap();
        assert!(!data.has_column(Variable::Gamma));
    }

    #[test]
    fn test_zero_height_is_fatal() {
        let mut data = ObservationSet::with_hourly_index(vec![
            (Variable::Hs, vec![0.0]),
            (Variable::Tp, vec![4.0]),
        ])
        .unwrap();
        let result = GammaEnricher::new(&wave(false, false, true)).enrich(&mut data);
        assert!(matches!(result, Err(MetoceanError::Precondition(_))));
    }
}
