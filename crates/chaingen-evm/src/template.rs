//! `DataSourceTemplate` bindings for Ethereum templates.

use chaingen_core::codegen::{
    module_import, safe_identifier, string_literal, to_pascal_case, GRAPH_TS_MODULE,
};
use chaingen_core::{DataSourceTemplate, TemplateCodeGen};

#[derive(Debug, Clone)]
pub struct EthereumTemplateCodeGen {
    name: String,
}

impl EthereumTemplateCodeGen {
    pub fn new(template: &DataSourceTemplate) -> Self {
        Self {
            name: template.name.clone(),
        }
    }
}

impl TemplateCodeGen for EthereumTemplateCodeGen {
    fn template_name(&self) -> &str {
        &self.name
    }

    fn generate_module_imports(&self) -> Vec<String> {
        vec![module_import(
            &["Address", "DataSourceTemplate", "DataSourceContext"],
            GRAPH_TS_MODULE,
        )]
    }

    fn generate_create_methods(&self) -> Vec<String> {
        let class = safe_identifier(&to_pascal_case(&self.name), "Template");
        let name = string_literal(&self.name);
        vec![format!(
            "export class {class} extends DataSourceTemplate {{\n\
             static create(address: Address): void {{\n\
             DataSourceTemplate.create({name}, [address.toHex()]);\n\
             }}\n\n\
             static createWithContext(address: Address, context: DataSourceContext): void {{\n\
             DataSourceTemplate.createWithContext({name}, [address.toHex()], context);\n\
             }}\n\
             }}"
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaingen_core::Manifest;

    #[test]
    fn create_methods_use_the_template_name() {
        let manifest = Manifest::from_yaml_str(
            "templates:\n  - kind: ethereum\n    name: Pair\n    mapping: {}\n",
        )
        .unwrap();
        let codegen = EthereumTemplateCodeGen::new(&manifest.templates[0]);
        assert_eq!(codegen.template_name(), "Pair");

        let class = &codegen.generate_create_methods()[0];
        assert!(class.starts_with("export class Pair extends DataSourceTemplate {"));
        assert!(class.contains("DataSourceTemplate.create(\"Pair\", [address.toHex()]);"));
        assert!(class.contains(
            "DataSourceTemplate.createWithContext(\"Pair\", [address.toHex()], context);"
        ));
    }
}
