use crate::{
    route::Curve::{self, Exponential as Exp, Linear as Lin, Logarithmic as Log},
    template::{Template, TemplateEntry},
};

// (source, destination, amount, curve, bipolar)
type Row = (&'static str, &'static str, f64, Curve, bool);

const FILTER_SWEEP: &[Row] = &[
    ("LFO 1", "FILTER1 CUTOFF", 0.5, Exp, true),
    ("ENV 2", "FILTER1 CUTOFF", 0.6, Exp, false),
    ("MOD WHEEL", "FILTER1 RESONANCE", 0.3, Lin, false),
];

const VIBRATO: &[Row] = &[
    ("LFO 2", "OSC1 PITCH", 0.05, Lin, true),
    ("LFO 2", "OSC2 PITCH", 0.05, Lin, true),
    ("MOD WHEEL", "LFO 2 RATE", 0.4, Lin, false),
    ("AFTERTOUCH", "OSC1 FINE", 0.1, Log, false),
];

const EXPRESSIVE: &[Row] = &[
    ("VELOCITY", "MASTER LEVEL", 0.6, Exp, false),
    ("VELOCITY", "FILTER1 CUTOFF", 0.4, Log, false),
    ("AFTERTOUCH", "FILTER1 RESONANCE", 0.3, Lin, false),
    ("PITCH BEND", "OSC1 PITCH", 0.04, Lin, true),
    ("PITCH BEND", "OSC2 PITCH", 0.04, Lin, true),
    ("KEY TRACK", "FILTER1 CUTOFF", 0.5, Lin, true),
];

const WOBBLE: &[Row] = &[
    ("LFO 1", "FILTER1 CUTOFF", 0.9, Exp, true),
    ("LFO 1", "OSC1 LEVEL", 0.2, Lin, false),
    ("SEQ 1", "LFO 1 RATE", 0.5, Lin, false),
    ("ENV 1", "FILTER1 DRIVE", 0.4, Exp, false),
];

const RANDOM_TEXTURE: &[Row] = &[
    ("RANDOM", "OSC1 WAVETABLE POS", 0.5, Lin, true),
    ("PERLIN", "OSC2 WAVETABLE POS", 0.5, Lin, true),
    ("PERLIN", "PAN", 0.3, Lin, true),
    ("RANDOM", "GRANULAR POSITION", 0.6, Lin, false),
    ("LFO 3", "REVERB MIX", 0.2, Lin, false),
];

const PERFORMANCE_PAD: &[Row] = &[
    ("XY PAD X", "FILTER1 CUTOFF", 0.7, Exp, false),
    ("XY PAD Y", "FILTER1 RESONANCE", 0.6, Lin, false),
    ("MACRO 1", "DELAY MIX", 0.5, Lin, false),
    ("MACRO 2", "REVERB SIZE", 0.5, Lin, false),
    ("MACRO 3", "GRANULAR PITCH", 0.25, Lin, true),
    ("MACRO 4", "OSC3 LEVEL", 0.8, Log, false),
];

const BUILTINS: &[(&str, &[Row])] = &[
    ("INIT", &[]),
    ("FILTER SWEEP", FILTER_SWEEP),
    ("VIBRATO", VIBRATO),
    ("EXPRESSIVE", EXPRESSIVE),
    ("WOBBLE", WOBBLE),
    ("RANDOM TEXTURE", RANDOM_TEXTURE),
    ("PERFORMANCE PAD", PERFORMANCE_PAD),
];

/// Factory templates in display order.
pub fn builtin_templates() -> Vec<Template> {
    BUILTINS
        .iter()
        .map(|(name, rows)| {
            rows.iter().fold(Template::new(*name), |template, &(src, dst, amount, curve, bipolar)| {
                let entry = TemplateEntry::new(src, dst, amount, curve);
                template.route(if bipolar { entry.bipolar() } else { entry })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{destination::DestinationTable, source::SourceTable, MAX_ROUTES};

    #[test]
    fn test_builtins_reference_builtin_catalogs() {
        let sources = SourceTable::default();
        let destinations = DestinationTable::builtin();
        for template in builtin_templates() {
            assert!(template.len() <= MAX_ROUTES);
            for entry in &template.entries {
                assert!(sources.id_of(&entry.source).is_some(), "{}: {}", template.name, entry.source);
                assert!(
                    destinations.id_of(&entry.destination).is_some(),
                    "{}: {}",
                    template.name,
                    entry.destination
                );
            }
        }
    }

    #[test]
    fn test_init_is_empty() {
        let templates = builtin_templates();
        assert_eq!(templates[0].name, "INIT");
        assert!(templates[0].is_empty());
    }
}
