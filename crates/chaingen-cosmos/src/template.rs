//! `DataSourceTemplate` bindings for Cosmos templates. Addresses are bech32
//! strings, passed through unchanged.

use chaingen_core::codegen::{
    module_import, safe_identifier, string_literal, to_pascal_case, GRAPH_TS_MODULE,
};
use chaingen_core::{DataSourceTemplate, TemplateCodeGen};

#[derive(Debug, Clone)]
pub struct CosmosTemplateCodeGen {
    name: String,
}

impl CosmosTemplateCodeGen {
    pub fn new(template: &DataSourceTemplate) -> Self {
        Self {
            name: template.name.clone(),
        }
    }
}

impl TemplateCodeGen for CosmosTemplateCodeGen {
    fn template_name(&self) -> &str {
        &self.name
    }

    fn generate_module_imports(&self) -> Vec<String> {
        vec![module_import(
            &["DataSourceTemplate", "DataSourceContext"],
            GRAPH_TS_MODULE,
        )]
    }

    fn generate_create_methods(&self) -> Vec<String> {
        let class = safe_identifier(&to_pascal_case(&self.name), "Template");
        let name = string_literal(&self.name);
        vec![format!(
            "export class {class} extends DataSourceTemplate {{\n\
             static create(address: string): void {{\n\
             DataSourceTemplate.create({name}, [address]);\n\
             }}\n\n\
             static createWithContext(address: string, context: DataSourceContext): void {{\n\
             DataSourceTemplate.createWithContext({name}, [address], context);\n\
             }}\n\
             }}"
        )]
    }
}
