use crate::error::{OperationError, Result};

/// Sample format of the class volume the classifier output is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassVolumeFormat {
    Float32,
    #[default]
    Integer8,
    Integer16,
}

impl ClassVolumeFormat {
    /// Largest normalization the format can represent, if bounded.
    #[must_use]
    pub fn max_normalization(self) -> Option<f64> {
        match self {
            ClassVolumeFormat::Float32 => None,
            ClassVolumeFormat::Integer8 => Some(128.0),
            ClassVolumeFormat::Integer16 => Some(32768.0),
        }
    }
}

/// Parameters of a classification run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierConfig {
    /// Multiplier applied to every classification value.
    pub normalization: f64,
    /// Output sample format; bounds the normalization.
    pub format: ClassVolumeFormat,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            normalization: 128.0,
            format: ClassVolumeFormat::default(),
        }
    }
}

impl ClassifierConfig {
    /// Creates a configuration with the given normalization.
    #[must_use]
    pub fn with_normalization(mut self, normalization: f64) -> Self {
        self.normalization = normalization;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: ClassVolumeFormat) -> Self {
        self.format = format;
        self
    }

    /// Checks the normalization against the output format.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the normalization is not
    /// positive or exceeds what the format can hold.
    pub fn validate(&self) -> Result<()> {
        if !(self.normalization.is_finite() && self.normalization > 0.0) {
            return Err(OperationError::InvalidInput(format!(
                "normalization factor must be positive, got {}",
                self.normalization
            ))
            .into());
        }
        if let Some(max) = self.format.max_normalization() {
            if self.normalization > max {
                return Err(OperationError::InvalidInput(format!(
                    "normalization factor cannot be greater than {max} for {:?} output",
                    self.format
                ))
                .into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(ClassifierConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive() {
        assert!(ClassifierConfig::default().with_normalization(0.0).validate().is_err());
        assert!(ClassifierConfig::default().with_normalization(f64::NAN).validate().is_err());
    }

    #[test]
    fn format_limits() {
        let cfg = ClassifierConfig::default().with_normalization(1000.0);
        assert!(cfg.validate().is_err());
        assert!(cfg.with_format(ClassVolumeFormat::Integer16).validate().is_ok());
        assert!(cfg
            .with_normalization(40000.0)
            .with_format(ClassVolumeFormat::Integer16)
            .validate()
            .is_err());
        assert!(cfg
            .with_normalization(40000.0)
            .with_format(ClassVolumeFormat::Float32)
            .validate()
            .is_ok());
    }
}
