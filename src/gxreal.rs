//! Milky Way realization of a fixed binary population.
//!
//! `GxReal` ties the pieces together:
//!
//! 1. scale the fixed population to the stellar mass of a Galactic component
//! 2. resample binary parameters from a logit-space Gaussian KDE
//! 3. draw positions and orientations from the Galactic density model
//! 4. compute LISA SNRs and the unresolved foreground for the realization

use rand::Rng;

use crate::data::{FixedPopulation, Table};
use crate::domain::{ForegroundBin, GxComponent, GxModel, RowFilter, SnrRecord};
use crate::error::AppError;
use crate::gw::constants::SEC_IN_YEAR;
use crate::gw::{Binary, MAX_ECC, compute_foreground, psd_calcs, snr_calcs};
use crate::kde::{DatTransform, GaussianKde, knuth_bw_selector};
use crate::sampling::{galactic_positions, mass_weighted_number, select_component_mass};

/// Diagnostics from the most recent `sample_population` call.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleDiagnostics {
    /// Fixed-population rows left after filtering.
    pub n_kde: usize,
    pub bandwidth: f64,
}

/// LISA observables of a realization.
#[derive(Debug, Clone)]
pub struct LisaObservation {
    pub snr: Vec<SnrRecord>,
    pub foreground: Vec<ForegroundBin>,
    /// Observation time (s).
    pub t_obs: f64,
}

#[derive(Debug, Clone)]
pub struct GxReal {
    fixed_pop: FixedPopulation,
    gx_model: GxModel,
    gx_component: GxComponent,
    dat_list: Vec<String>,
    filters: Vec<RowFilter>,
    n_samp: Option<usize>,
    diagnostics: Option<SampleDiagnostics>,
    realization: Option<Table>,
}

impl GxReal {
    pub fn new(
        fixed_pop: FixedPopulation,
        gx_model: GxModel,
        gx_component: GxComponent,
        dat_list: Vec<String>,
    ) -> Self {
        Self {
            fixed_pop,
            gx_model,
            gx_component,
            dat_list,
            filters: Vec::new(),
            n_samp: None,
            diagnostics: None,
            realization: None,
        }
    }

    /// Restrict the fixed population before building the KDE.
    pub fn with_filters(mut self, filters: Vec<RowFilter>) -> Self {
        self.filters = filters;
        self
    }

    /// Use an explicit realization size instead of the mass-weighted number.
    pub fn with_n_samp(mut self, n_samp: usize) -> Self {
        self.n_samp = Some(n_samp);
        self
    }

    pub fn component(&self) -> GxComponent {
        self.gx_component
    }

    pub fn model(&self) -> GxModel {
        self.gx_model
    }

    pub fn dat_list(&self) -> &[String] {
        &self.dat_list
    }

    pub fn fixed_pop(&self) -> &FixedPopulation {
        &self.fixed_pop
    }

    pub fn realization(&self) -> Option<&Table> {
        self.realization.as_ref()
    }

    pub fn diagnostics(&self) -> Option<&SampleDiagnostics> {
        self.diagnostics.as_ref()
    }

    /// Number of systems in the Milky Way realization of this component.
    ///
    /// The result is cached; an explicit override takes precedence.
    pub fn compute_n_sample(&mut self) -> Result<usize, AppError> {
        if let Some(n) = self.n_samp {
            return Ok(n);
        }
        let component_mass = select_component_mass(self.gx_component);
        let n = mass_weighted_number(
            self.fixed_pop.n_binaries(),
            self.fixed_pop.fixed_mass,
            component_mass,
        )?;
        tracing::info!(
            component = self.gx_component.display_name(),
            component_mass,
            n_fixed = self.fixed_pop.n_binaries(),
            n_samp = n,
            "computed mass-weighted realization size"
        );
        self.n_samp = Some(n);
        Ok(n)
    }

    /// Monte-Carlo sample a Galactic realization and store it.
    ///
    /// Columns are `dat_list` followed by the position/orientation columns.
    pub fn sample_population<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Table, AppError> {
        let n_samp = self.compute_n_sample()?;

        let pop = self.fixed_pop.table.filter_rows(&self.filters)?;
        if pop.n_rows() < self.fixed_pop.n_binaries() {
            tracing::info!(
                kept = pop.n_rows(),
                total = self.fixed_pop.n_binaries(),
                "filtered fixed population"
            );
        }
        if pop.n_rows() < 2 {
            return Err(AppError::input(format!(
                "Need at least 2 binaries to build a KDE, {} remain after filtering.",
                pop.n_rows()
            )));
        }

        let transform = DatTransform::fit(&pop, &self.dat_list)?.with_limits("ecc", 0.0, MAX_ECC)?;
        let dat_kde = transform.dat_transform(&pop)?;
        let bandwidth = knuth_bw_selector(&dat_kde)?;
        tracing::debug!(bandwidth, params = ?self.dat_list, "selected KDE bandwidth");

        let kernel = GaussianKde::new(dat_kde, bandwidth)?;
        let binary_dat_trans = kernel.resample(n_samp, rng);
        let mut realization = transform.dat_un_transform(&binary_dat_trans)?;

        let positions = galactic_positions(self.gx_component, n_samp, self.gx_model, rng)?;
        realization.extend(positions.into_table()?)?;

        tracing::info!(
            n_samp,
            component = self.gx_component.display_name(),
            model = self.gx_model.display_name(),
            "sampled Galactic realization"
        );

        self.diagnostics = Some(SampleDiagnostics {
            n_kde: pop.n_rows(),
            bandwidth,
        });
        Ok(&*self.realization.insert(realization))
    }

    /// SNR and foreground of the stored realization as seen by LISA.
    ///
    /// `t_obs_years` is the mission duration in years.
    pub fn lisa_obs(&self, t_obs_years: f64, n_harmonics: u32) -> Result<LisaObservation, AppError> {
        let realization = self.realization.as_ref().ok_or(AppError::NotSampled)?;
        observe_realization(realization, t_obs_years, n_harmonics)
    }
}

/// SNR and foreground of any realization table.
///
/// Requires `mass1`, `mass2`, `porb` (years) and `dist` (kpc); `ecc` is
/// optional (circular when absent).
pub fn observe_realization(
    realization: &Table,
    t_obs_years: f64,
    n_harmonics: u32,
) -> Result<LisaObservation, AppError> {
    let binaries = binaries_from_table(realization)?;
    let t_obs = t_obs_years * SEC_IN_YEAR;

    let snr = snr_calcs(&binaries, n_harmonics, t_obs)?;
    let psd = psd_calcs(&binaries, n_harmonics, t_obs)?;
    let foreground = compute_foreground(&psd, t_obs)?;

    tracing::info!(
        n_binaries = binaries.len(),
        n_psd_records = psd.len(),
        n_foreground_bins = foreground.len(),
        t_obs_years,
        "computed LISA observables"
    );

    Ok(LisaObservation { snr, foreground, t_obs })
}

/// Convert realization rows into SI binaries.
pub fn binaries_from_table(table: &Table) -> Result<Vec<Binary>, AppError> {
    let m1 = table.require_column("mass1")?;
    let m2 = table.require_column("mass2")?;
    let porb = table.require_column("porb")?;
    let dist = table.require_column("dist")?;
    let ecc = table.column("ecc");
    if ecc.is_none() {
        tracing::warn!("realization has no `ecc` column; treating all binaries as circular");
    }

    let binaries: Vec<Binary> = (0..table.n_rows())
        .map(|i| {
            Binary::from_galactic_units(m1[i], m2[i], porb[i], ecc.map_or(0.0, |e| e[i]), dist[i])
        })
        .collect();
    Ok(binaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::sampling::POSITION_COLUMNS;

    fn fixed_population(n: usize) -> FixedPopulation {
        population_with_ecc(n, |rng, _| rng.gen_range(0.0..0.3))
    }

    fn population_with_ecc(n: usize, mut ecc_of: impl FnMut(&mut StdRng, usize) -> f64) -> FixedPopulation {
        let mut rng = StdRng::seed_from_u64(17);
        let mass1: Vec<f64> = (0..n).map(|_| rng.gen_range(0.5..1.0)).collect();
        let mass2: Vec<f64> = (0..n).map(|_| rng.gen_range(0.3..0.7)).collect();
        let porb: Vec<f64> = (0..n).map(|_| 10f64.powf(rng.gen_range(-5.5..-3.5))).collect();
        let ecc: Vec<f64> = (0..n).map(|i| ecc_of(&mut rng, i)).collect();
        let table = Table::from_columns([("mass1", mass1), ("mass2", mass2), ("porb", porb), ("ecc", ecc)]).unwrap();
        FixedPopulation::new(table, 1e7).unwrap()
    }

    fn dat_list() -> Vec<String> {
        ["mass1", "mass2", "porb", "ecc"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn compute_n_sample_is_mass_weighted() {
        let mut gx = GxReal::new(fixed_population(100), GxModel::McMillan, GxComponent::Bulge, dat_list());
        // 100 * 8.9e9 / 1e7
        assert_eq!(gx.compute_n_sample().unwrap(), 89_000);
    }

    #[test]
    fn sample_population_builds_realization_within_bounds() {
        let pop = fixed_population(300);
        let porb_max = pop.table.column("porb").unwrap().iter().cloned().fold(0.0, f64::max);
        let mut gx = GxReal::new(pop, GxModel::McMillan, GxComponent::ThinDisk, dat_list()).with_n_samp(500);
        let mut rng = StdRng::seed_from_u64(99);

        let realization = gx.sample_population(&mut rng).unwrap();
        assert_eq!(realization.n_rows(), 500);
        let expected: Vec<String> = dat_list()
            .into_iter()
            .chain(POSITION_COLUMNS.iter().map(|s| s.to_string()))
            .collect();
        assert_eq!(realization.names(), expected.as_slice());

        for &p in realization.column("porb").unwrap() {
            assert!(p > 0.0 && p <= 1.05 * porb_max);
        }
        for &e in realization.column("ecc").unwrap() {
            assert!((0.0..0.32).contains(&e), "ecc {e}");
        }
        assert!(gx.diagnostics().unwrap().bandwidth > 0.0);
    }

    #[test]
    fn lisa_obs_requires_a_realization() {
        let gx = GxReal::new(fixed_population(10), GxModel::McMillan, GxComponent::Bulge, dat_list());
        assert!(matches!(gx.lisa_obs(4.0, 150), Err(AppError::NotSampled)));
    }

    #[test]
    fn lisa_obs_reports_snr_per_binary() {
        let mut gx = GxReal::new(fixed_population(200), GxModel::McMillan, GxComponent::ThinDisk, dat_list())
            .with_n_samp(50);
        gx.sample_population(&mut StdRng::seed_from_u64(4)).unwrap();

        let obs = gx.lisa_obs(4.0, 150).unwrap();
        assert_eq!(obs.snr.len(), 50);
        assert!(obs.snr.iter().all(|r| r.snr.is_finite() && r.snr >= 0.0));
        assert!(!obs.foreground.is_empty());
        let total_sources: usize = obs.foreground.iter().map(|b| b.n_sources).sum();
        assert!(total_sources >= 50);
    }

    #[test]
    fn circular_binaries_stay_circular_not_negative() {
        // Half of the population sits exactly on e = 0.
        let pop = population_with_ecc(300, |rng, i| if i % 2 == 0 { 0.0 } else { rng.gen_range(0.0..0.3) });
        let mut gx = GxReal::new(pop, GxModel::McMillan, GxComponent::ThinDisk, dat_list()).with_n_samp(2000);
        gx.sample_population(&mut StdRng::seed_from_u64(21)).unwrap();

        let ecc = gx.realization().unwrap().column("ecc").unwrap();
        assert!(ecc.iter().all(|&e| (0.0..1.0).contains(&e)));
        assert!(ecc.iter().any(|&e| e == 0.0));

        let obs = gx.lisa_obs(4.0, 150).unwrap();
        assert_eq!(obs.snr.len(), 2000);
    }

    #[test]
    fn highly_eccentric_binaries_stay_bound() {
        let pop = population_with_ecc(300, |rng, _| rng.gen_range(0.5..0.98));
        let mut gx = GxReal::new(pop, GxModel::McMillan, GxComponent::Bulge, dat_list()).with_n_samp(300);
        gx.sample_population(&mut StdRng::seed_from_u64(8)).unwrap();

        let ecc = gx.realization().unwrap().column("ecc").unwrap();
        let max_ecc = ecc.iter().cloned().fold(0.0, f64::max);
        assert!(ecc.iter().all(|&e| e > 0.0) && max_ecc <= MAX_ECC, "max ecc {max_ecc}");

        let obs = gx.lisa_obs(4.0, 50).unwrap();
        assert_eq!(obs.snr.len(), 300);
        assert!(obs.snr.iter().all(|r| r.snr.is_finite()));
    }

    #[test]
    fn constant_parameter_is_an_input_error() {
        let pop = population_with_ecc(50, |_, _| 0.1);
        let mut gx = GxReal::new(pop, GxModel::McMillan, GxComponent::Bulge, dat_list()).with_n_samp(10);
        let err = gx.sample_population(&mut StdRng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(err, AppError::Input(_)));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn filters_can_empty_the_population() {
        let filters = vec![RowFilter { column: "mass1".into(), min: Some(5.0), max: None }];
        let mut gx = GxReal::new(fixed_population(50), GxModel::McMillan, GxComponent::Bulge, dat_list())
            .with_filters(filters)
            .with_n_samp(10);
        assert!(gx.sample_population(&mut StdRng::seed_from_u64(0)).is_err());
    }
}
