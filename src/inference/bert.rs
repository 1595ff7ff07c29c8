use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;
use std::sync::Arc;

use super::utils::{MODEL_CONFIG_FILE, MODEL_WEIGHTS_FILE};

/// Loads a BERT body, accepting checkpoints saved with or without a `bert.`/`roberta.` prefix.
fn load_body(vb: &VarBuilder, config: &Config) -> Result<BertModel> {
    if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("bert"), config)
    } else if vb.contains_tensor("roberta.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("roberta"), config)
    } else {
        BertModel::load(vb.clone(), config)
    }
}

fn read_config(model_dir: &Path) -> Result<(Config, String)> {
    let raw = std::fs::read_to_string(model_dir.join(MODEL_CONFIG_FILE))?;
    let config: Config = serde_json::from_str(&raw)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;
    Ok((config, raw))
}

fn var_builder(model_dir: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    let weights_path = model_dir.join(MODEL_WEIGHTS_FILE);
    // SAFETY: the weights file is opened read-only and is not modified while mapped.
    unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device) }
}

/// BERT body returning per-token hidden states (`[batch, seq, hidden]`).
#[derive(Clone)]
pub struct BertEncoder {
    model: Arc<BertModel>,
    hidden_size: usize,
}

impl BertEncoder {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let (config, _) = read_config(model_dir)?;
        let vb = var_builder(model_dir, device)?;
        let model = load_body(&vb, &config)?;

        Ok(Self {
            model: Arc::new(model),
            hidden_size: config.hidden_size,
        })
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        self.model
            .forward(input_ids, token_type_ids, attention_mask)
    }
}

struct BertForTokenClassificationImpl {
    bert: BertModel,
    classifier: Linear,
}

impl BertForTokenClassificationImpl {
    fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let output = self
            .bert
            .forward(input_ids, token_type_ids, attention_mask)?;
        self.classifier.forward(&output)
    }
}

/// BERT with a per-token classification head (`[batch, seq, num_labels]` logits).
#[derive(Clone)]
pub struct BertTokenClassifier {
    model: Arc<BertForTokenClassificationImpl>,
    labels: Arc<Vec<String>>,
}

impl BertTokenClassifier {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let (config, raw) = read_config(model_dir)?;
        let labels = parse_id2label(&raw)?;

        let vb = var_builder(model_dir, device)?;
        let bert = load_body(&vb, &config)?;
        let classifier = candle_nn::linear(config.hidden_size, labels.len(), vb.pp("classifier"))?;

        Ok(Self {
            model: Arc::new(BertForTokenClassificationImpl { bert, classifier }),
            labels: Arc::new(labels),
        })
    }

    /// Label names indexed by class id (e.g. `O`, `B-PER`, `I-MISC`).
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        self.model.forward(input_ids, token_type_ids, attention_mask)
    }
}

/// Reads `id2label` from a HF `config.json` into a dense, id-ordered label list.
pub fn parse_id2label(raw_config: &str) -> Result<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(raw_config)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

    let map = value
        .get("id2label")
        .and_then(|v| v.as_object())
        .ok_or_else(|| candle::Error::Msg("config.json has no id2label map".to_string()))?;

    let mut pairs = Vec::with_capacity(map.len());
    for (id, label) in map {
        let id: usize = id
            .parse()
            .map_err(|_| candle::Error::Msg(format!("non-numeric label id '{id}'")))?;
        let label = label
            .as_str()
            .ok_or_else(|| candle::Error::Msg(format!("label {id} is not a string")))?;
        pairs.push((id, label.to_string()));
    }
    pairs.sort_by_key(|(id, _)| *id);

    if pairs.iter().enumerate().any(|(i, (id, _))| i != *id) {
        return Err(candle::Error::Msg(
            "id2label ids are not contiguous from 0".to_string(),
        ));
    }

    Ok(pairs.into_iter().map(|(_, label)| label).collect())
}
