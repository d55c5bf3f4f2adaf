//! Prompt templates for Resuma.
//!
//! Prompts can be customized by placing TOML files in the custom prompts
//! directory. The defaults are Portuguese, matching the UI language.

use crate::generation::Mode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates, one per output mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompts {
    pub summary: ModePrompt,
    pub mind_map: ModePrompt,
}

/// System and user templates for one output mode.
///
/// The user template supports `{{transcript}}` and `{{mode}}` variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModePrompt {
    pub system: String,
    pub user: String,
}

const USER_TEMPLATE: &str = r#"Texto de entrada: {{transcript}}
Tipo de saída: {{mode}}

Se for um resumo, forneça um texto conciso e bem estruturado.
Se for um mapa mental, forneça em formato de Markdown hierárquico conforme especificado."#;

impl Default for ModePrompt {
    fn default() -> Self {
        Self {
            system: String::new(),
            user: USER_TEMPLATE.to_string(),
        }
    }
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            summary: ModePrompt {
                system: r#"Você é um assistente que cria resumos concisos e bem estruturados.
Evite usar asteriscos ou marcadores especiais.
Mantenha o texto limpo e direto.
Use parágrafos para separar ideias diferentes."#
                    .to_string(),
                user: USER_TEMPLATE.to_string(),
            },
            mind_map: ModePrompt {
                system: r#"Você é um assistente especializado em criar mapas mentais.
Crie um mapa mental em formato Markdown usando títulos e listas.
Estruture o conteúdo de forma hierárquica usando # para títulos e - para listas.
Use no máximo 3 níveis de profundidade para manter a clareza.

Exemplo do formato esperado:
# Tema Central
## Tópico Principal 1
- Subtópico 1.1
    - Detalhe 1.1.1
- Subtópico 1.2
## Tópico Principal 2
- Subtópico 2.1
- Subtópico 2.2"#
                    .to_string(),
                user: USER_TEMPLATE.to_string(),
            },
        }
    }
}

impl Prompts {
    /// Load prompts from defaults, with an optional custom directory overlay.
    pub fn load(custom_dir: Option<&str>) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }

            let mind_map_path = custom_path.join("mind_map.toml");
            if mind_map_path.exists() {
                let content = std::fs::read_to_string(&mind_map_path)?;
                prompts.mind_map = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Get the prompt pair for an output mode.
    pub fn for_mode(&self, mode: Mode) -> &ModePrompt {
        match mode {
            Mode::Summary => &self.summary,
            Mode::MindMap => &self.mind_map,
        }
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts_are_mode_specific() {
        let prompts = Prompts::default();
        assert!(!prompts.summary.system.is_empty());
        assert!(!prompts.mind_map.system.is_empty());
        assert!(prompts.mind_map.system.contains("Markdown"));
        assert!(prompts.summary.system.contains("resumos"));
        assert_ne!(prompts.summary.system, prompts.mind_map.system);
    }

    #[test]
    fn test_for_mode_selects_matching_prompt() {
        let prompts = Prompts::default();
        assert_eq!(
            prompts.for_mode(Mode::MindMap).system,
            prompts.mind_map.system
        );
        assert_eq!(
            prompts.for_mode(Mode::Summary).system,
            prompts.summary.system
        );
    }

    #[test]
    fn test_render_template() {
        let template = "Texto de entrada: {{transcript}}\nTipo de saída: {{mode}}";
        let mut vars = std::collections::HashMap::new();
        vars.insert("transcript".to_string(), "olá mundo".to_string());
        vars.insert("mode".to_string(), "Resumo".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Texto de entrada: olá mundo\nTipo de saída: Resumo");
    }
}
