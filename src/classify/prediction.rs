use serde::Serialize;

use crate::classify::policy::ConfidencePolicy;
use crate::error::BridgeError;

/// Top-1 result, serialized with camelCase keys for the scripting side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub index: usize,
    pub scientific_name: String,
    pub common_name: String,
    pub confidence: f32,
    pub confirmation_required: bool,
}

/// Picks the highest score (first one wins on ties) and applies `policy`.
pub fn interpret(
    scores: &[f32],
    labels: &[String],
    policy: &ConfidencePolicy,
) -> Result<Prediction, BridgeError> {
    let (first, rest) = scores
        .split_first()
        .ok_or_else(|| BridgeError::InvalidArgument("no scores to interpret".into()))?;
    if let Some(i) = scores.iter().position(|s| !s.is_finite()) {
        return Err(BridgeError::InvalidArgument(format!(
            "score {i} is not a finite number ({})",
            scores[i]
        )));
    }

    let mut index = 0;
    let mut confidence = *first;
    for (i, &s) in rest.iter().enumerate() {
        if s > confidence {
            confidence = s;
            index = i + 1;
        }
    }

    let label = labels.get(index).ok_or_else(|| {
        BridgeError::InvalidArgument(format!(
            "score index {index} has no label ({} labels known)",
            labels.len()
        ))
    })?;

    if confidence >= policy.accept {
        log::info!("high confidence {confidence:.2} for {label}");
    } else if confidence >= policy.confirm {
        log::warn!("medium confidence {confidence:.2} for {label}, confirmation required");
    } else {
        return Err(BridgeError::ConfidenceTooLow(confidence));
    }

    Ok(Prediction {
        index,
        scientific_name: label.clone(),
        common_name: label.replacen('_', " ", 1),
        confidence,
        confirmation_required: confidence < policy.accept,
    })
}
