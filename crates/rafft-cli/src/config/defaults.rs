use rafft::core::encoding::EncodingScheme;

pub struct DefaultsConfig {
    pub min_stem_length: usize,
    pub min_loop_size: usize,
    pub pseudoknots: bool,
    pub shortlist_size: usize,
    pub exhaustive: bool,
    pub padding: f64,
    pub gc_weight: f64,
    pub au_weight: f64,
    pub gu_weight: f64,
    pub scheme: EncodingScheme,
    pub evaluate_energy: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            min_stem_length: 2,
            min_loop_size: 3,
            pseudoknots: false,
            shortlist_size: 20,
            exhaustive: false,
            padding: 1.0,
            gc_weight: 1.0,
            au_weight: 1.0,
            gu_weight: 1.0,
            scheme: EncodingScheme::Nucleotide,
            evaluate_energy: true,
        }
    }
}
