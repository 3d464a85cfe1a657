//! Rust source rendering for compiled modules.
//!
//! Output depends only on the [`CompiledModule`] (ordered maps all the way
//! down) and the [`CompilerConfig`]; no timestamps or paths are embedded, so
//! recompiling unchanged declarations yields byte-identical files.

use crate::config::CompilerConfig;
use crate::model::{CompiledConstructor, CompiledModule, CompiledRoute, CompiledService};
use heck::ToUpperCamelCase;
use xrouter_api::naming::{route_table_name, service_provider_name};

/// Identifier of the generated type for a convention name,
/// e.g. `order$RouteTable_pay` → `OrderRouteTablePay`.
pub fn type_ident(provider_name: &str) -> String {
    provider_name.to_upper_camel_case()
}

pub fn table_ident(module: &str, group: &str) -> String {
    type_ident(&route_table_name(module, group))
}

pub fn service_ident(module: &str) -> String {
    type_ident(&service_provider_name(module))
}

/// Rust string literal for `value`.
fn literal(value: &str) -> String {
    format!("{value:?}")
}

struct CodeWriter {
    out: String,
    indent: usize,
}

impl CodeWriter {
    fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
        }
    }

    fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.out.push_str("    ");
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.indent += 1;
    }

    fn close(&mut self, text: impl AsRef<str>) {
        self.indent = self.indent.saturating_sub(1);
        self.line(text);
    }

    /// `fn <name>(&self) -> &str { "<value>" }`
    fn str_getter(&mut self, name: &str, value: &str) {
        self.open(format!("fn {name}(&self) -> &str {{"));
        self.line(literal(value));
        self.close("}");
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Render the provider file of one module.
pub fn render_module(module: &CompiledModule, config: &CompilerConfig) -> String {
    let api = config.api_crate.as_str();
    let mut w = CodeWriter::new();

    w.line(format!(
        "// @generated by xrouter-compiler for module `{}`. Do not edit.",
        module.module
    ));
    w.blank();

    for (group, routes) in &module.groups {
        render_table(&mut w, api, &module.module, group, routes.values());
        w.blank();
    }

    if !module.services.is_empty() {
        render_services(&mut w, api, &module.module, module.services.values());
        w.blank();
    }

    w.line(format!(
        "/// Registers every provider generated for module `{}`.",
        module.module
    ));
    if module.is_empty() {
        w.line(format!(
            "pub fn register(_catalog: &mut {api}::ProviderCatalog) {{}}"
        ));
    } else {
        w.open(format!(
            "pub fn register(catalog: &mut {api}::ProviderCatalog) {{"
        ));
        for group in module.groups.keys() {
            w.line(format!(
                "catalog.register_route_table({});",
                table_ident(&module.module, group)
            ));
        }
        if !module.services.is_empty() {
            w.line(format!(
                "catalog.register_service_provider({});",
                service_ident(&module.module)
            ));
        }
        w.close("}");
    }

    w.finish()
}

fn render_table<'a>(
    w: &mut CodeWriter,
    api: &str,
    module: &str,
    group: &str,
    routes: impl Iterator<Item = &'a CompiledRoute>,
) {
    let name = route_table_name(module, group);
    let ident = type_ident(&name);

    w.line(format!("/// Route table `{name}`."));
    w.line(format!("pub struct {ident};"));
    w.blank();
    w.open(format!("impl {api}::RouteTableProvider for {ident} {{"));
    w.str_getter("name", &name);
    w.blank();
    w.str_getter("module", module);
    w.blank();
    w.str_getter("group", group);
    w.blank();
    w.open(format!("fn route_map(&self) -> {api}::RouteMap {{"));
    w.line(format!("let mut routes = {api}::RouteMap::new();"));
    for route in routes {
        let descriptor = match &route.factory {
            Some(factory) => format!(
                "{api}::TargetDescriptor::from_factory::<{}>({}, {factory}),",
                route.target,
                literal(group)
            ),
            None => format!(
                "{api}::TargetDescriptor::of::<{}>({}),",
                route.target,
                literal(group)
            ),
        };
        w.open("routes.insert(");
        w.line(format!("{}.to_string(),", literal(&route.path)));
        w.line(descriptor);
        w.close(");");
    }
    w.line("routes");
    w.close("}");
    w.close("}");
}

fn render_services<'a>(
    w: &mut CodeWriter,
    api: &str,
    module: &str,
    services: impl Iterator<Item = &'a CompiledService>,
) {
    let name = service_provider_name(module);
    let ident = type_ident(&name);

    w.line(format!("/// Service provider `{name}`."));
    w.line(format!("pub struct {ident};"));
    w.blank();
    w.open(format!("impl {api}::RouterServiceProvider for {ident} {{"));
    w.str_getter("name", &name);
    w.blank();
    w.str_getter("module", module);
    w.blank();
    w.open(format!("fn registry(&self) -> &{api}::ServiceRegistry {{"));
    w.line(format!(
        "static REGISTRY: ::std::sync::OnceLock<{api}::ServiceRegistry> ="
    ));
    w.line("    ::std::sync::OnceLock::new();");
    w.open("REGISTRY.get_or_init(|| {");
    w.line(format!(
        "let mut registry = {api}::ServiceRegistry::new({});",
        literal(module)
    ));
    for service in services {
        w.open("registry.register(");
        w.line(format!(
            "{api}::ServiceDescriptor::new({}, {})",
            literal(&service.path),
            literal(&service.target)
        ));
        w.indent += 1;
        let last = service.constructors.len().saturating_sub(1);
        for (i, ctor) in service.constructors.iter().enumerate() {
            render_constructor(w, api, service, ctor, i == last);
        }
        w.indent -= 1;
        w.close(");");
    }
    w.line("registry");
    w.close("})");
    w.close("}");
    w.close("}");
}

fn render_constructor(
    w: &mut CodeWriter,
    api: &str,
    service: &CompiledService,
    ctor: &CompiledConstructor,
    last: bool,
) {
    let signature = ctor
        .signature
        .iter()
        .map(|kind| format!("{api}::ParamKind::{kind:?}"))
        .collect::<Vec<_>>()
        .join(", ");
    let (binding, value) = match &ctor.function {
        Some(function) => ("args", format!("{function}(args)?")),
        None => (
            "_args",
            format!(
                "<{} as ::std::default::Default>::default()",
                service.target
            ),
        ),
    };

    w.open(format!(".constructor(&[{signature}], |{binding}| {{"));
    w.open(format!(
        "Ok({api}::ServiceInstance::new::<::std::sync::Arc<{}>>(",
        service.published_type()
    ));
    w.line(format!("::std::sync::Arc::new({value}),"));
    w.close("))");
    w.close(if last { "})," } else { "})" });
}

/// Render the aggregate that includes every generated module file and
/// registers them all.
///
/// `modules` pairs each `mod` name with the file it includes, in module order.
pub fn render_aggregate(modules: &[(String, String)], config: &CompilerConfig) -> String {
    let api = config.api_crate.as_str();
    let mut w = CodeWriter::new();

    w.line("// @generated by xrouter-compiler. Do not edit.");
    w.blank();
    for (mod_name, file_name) in modules {
        w.open(format!("pub mod {mod_name} {{"));
        w.line(format!("include!({});", literal(file_name)));
        w.close("}");
        w.blank();
    }

    w.line("/// Registers the providers of every generated module, in module order.");
    if modules.is_empty() {
        w.line(format!(
            "pub fn register_all(_catalog: &mut {api}::ProviderCatalog) {{}}"
        ));
    } else {
        w.open(format!(
            "pub fn register_all(catalog: &mut {api}::ProviderCatalog) {{"
        ));
        for (mod_name, _) in modules {
            w.line(format!("{mod_name}::register(catalog);"));
        }
        w.close("}");
    }

    w.finish()
}
