//! Type definitions specific to the analyzer module.

/// One experiment run: a legend label and its loss values.
///
/// The value at index `i` is the loss recorded at epoch `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct LossSeries {
    pub label: String,
    pub values: Vec<f64>,
}

impl LossSeries {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }

    /// Number of epochs in the series.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(epoch, loss)` pairs in epoch order, skipping non-finite losses.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, loss)| loss.is_finite())
            .map(|(epoch, &loss)| (epoch as f64, loss))
    }

    /// Runs of consecutive finite `(epoch, loss)` pairs.
    ///
    /// A non-finite loss ends the current run, so a line drawn per run breaks
    /// at that epoch instead of bridging it.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for (epoch, &loss) in self.values.iter().enumerate() {
            if loss.is_finite() {
                current.push((epoch as f64, loss));
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}
