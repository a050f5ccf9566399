//! Proc-macro implementation for `#[derive(Component)]`.
//!
//! The derive reads role markers and entry points from `#[component(...)]`,
//! collects the declared fields (flagging those marked `#[inject]`) and emits a
//! static descriptor plus the runtime bindings of the injected fields.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, Type};

#[derive(Clone, Copy, PartialEq, Eq)]
enum RoleName {
    Microservice,
    Controller,
    CommandService,
    QueryService,
    ApplicationService,
    Repository,
    FrameworkService,
    ServiceConfig,
}

impl RoleName {
    const ALL: [(&'static str, RoleName); 8] = [
        ("microservice", RoleName::Microservice),
        ("controller", RoleName::Controller),
        ("command_service", RoleName::CommandService),
        ("query_service", RoleName::QueryService),
        ("application_service", RoleName::ApplicationService),
        ("repository", RoleName::Repository),
        ("framework_service", RoleName::FrameworkService),
        ("service_config", RoleName::ServiceConfig),
    ];

    fn parse(keyword: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(name, _)| *name == keyword)
            .map(|(_, role)| *role)
    }

    fn is_service(self) -> bool {
        matches!(
            self,
            Self::CommandService | Self::QueryService | Self::ApplicationService
        )
    }

    fn expected() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(|(name, _)| *name).collect();
        format!("unknown role; expected one of: {}, or `operations(...)`", names.join(", "))
    }
}

struct RoleAttr {
    name: RoleName,
    stateful: bool,
    config: String,
}

impl RoleAttr {
    fn tokens(&self) -> TokenStream {
        let stateful = self.stateful;
        let config = &self.config;
        let spec = quote! {
            ::layerkit::ServiceSpec { stateful: #stateful, config: #config }
        };
        match self.name {
            RoleName::Microservice => quote!(::layerkit::Role::Microservice),
            RoleName::Controller => quote!(::layerkit::Role::Controller),
            RoleName::CommandService => quote!(::layerkit::Role::CommandService(#spec)),
            RoleName::QueryService => quote!(::layerkit::Role::QueryService(#spec)),
            RoleName::ApplicationService => quote!(::layerkit::Role::ApplicationService(#spec)),
            RoleName::Repository => quote!(::layerkit::Role::Repository),
            RoleName::FrameworkService => quote!(::layerkit::Role::FrameworkService),
            RoleName::ServiceConfig => quote!(::layerkit::Role::ServiceConfig),
        }
    }
}

#[derive(Default)]
struct ComponentArgs {
    roles: Vec<RoleAttr>,
    operations: Vec<String>,
}

impl ComponentArgs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut args = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("component")) {
            attr.parse_nested_meta(|meta| args.parse_entry(&meta))?;
        }
        Ok(args)
    }

    fn parse_entry(&mut self, meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
        if meta.path.is_ident("operations") {
            return meta.parse_nested_meta(|op| {
                let ident = op
                    .path
                    .get_ident()
                    .ok_or_else(|| op.error("expected an operation name"))?;
                let name = ident.unraw().to_string();
                if self.operations.contains(&name) {
                    return Err(op.error(format!("duplicate operation `{name}`")));
                }
                self.operations.push(name);
                Ok(())
            });
        }

        let keyword = meta
            .path
            .get_ident()
            .map(ToString::to_string)
            .unwrap_or_default();
        let Some(name) = RoleName::parse(&keyword) else {
            return Err(meta.error(RoleName::expected()));
        };
        if self.roles.iter().any(|role| role.name == name) {
            return Err(meta.error(format!("duplicate role `{keyword}`")));
        }

        let mut role = RoleAttr {
            name,
            stateful: false,
            config: String::new(),
        };
        if meta.input.peek(syn::token::Paren) {
            if !name.is_service() {
                return Err(meta.error(format!(
                    "`{keyword}` does not take parameters; `stateful` and `config` apply to service roles only"
                )));
            }
            meta.parse_nested_meta(|param| {
                if param.path.is_ident("stateful") {
                    role.stateful = true;
                    Ok(())
                } else if param.path.is_ident("config") {
                    let lit: LitStr = param.value()?.parse()?;
                    role.config = lit.value();
                    Ok(())
                } else {
                    Err(param.error("expected `stateful` or `config = \"...\"`"))
                }
            })?;
        }
        self.roles.push(role);
        Ok(())
    }
}

struct FieldInfo<'a> {
    name: String,
    access: TokenStream,
    ty: &'a Type,
    injected: bool,
}

fn collect_fields(fields: &Fields) -> syn::Result<Vec<FieldInfo<'_>>> {
    fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let (name, access) = match &field.ident {
                Some(ident) => (ident.unraw().to_string(), quote!(#ident)),
                None => {
                    let index = syn::Index::from(idx);
                    (idx.to_string(), quote!(#index))
                }
            };
            Ok(FieldInfo {
                name,
                access,
                ty: &field.ty,
                injected: is_injected(&field.attrs)?,
            })
        })
        .collect()
}

fn is_injected(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut injected = false;
    for attr in attrs.iter().filter(|a| a.path().is_ident("inject")) {
        attr.meta.require_path_only()?;
        if injected {
            return Err(syn::Error::new_spanned(attr, "duplicate #[inject]"));
        }
        injected = true;
    }
    Ok(injected)
}

/// Expands `#[derive(Component)]`, turning any validation failure into a
/// `compile_error!` at the offending span.
pub fn expand_component(input: &DeriveInput) -> TokenStream {
    try_expand(input).unwrap_or_else(syn::Error::into_compile_error)
}

fn try_expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Component cannot be derived for generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => collect_fields(&data.fields)?,
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "Component can only be derived for structs",
            ));
        }
    };

    let args = ComponentArgs::parse(&input.attrs)?;
    if args.roles.is_empty() {
        return Err(syn::Error::new_spanned(
            name,
            "missing role marker: add e.g. #[component(command_service)]",
        ));
    }

    let roles = args.roles.iter().map(RoleAttr::tokens);
    let operations = &args.operations;
    let field_descriptors = fields.iter().map(|field| {
        let field_name = &field.name;
        let ty = field.ty;
        let injected = field.injected;
        quote! {
            .with_field(::layerkit::FieldDescriptor::new(
                #field_name,
                ::std::any::type_name::<#ty>(),
                #injected,
            ))
        }
    });

    let bindings: Vec<TokenStream> = fields
        .iter()
        .filter(|field| field.injected)
        .map(|field| {
            let field_name = &field.name;
            let access = &field.access;
            quote! {
                ::layerkit::Binding::new(#field_name, ::layerkit::Injectable::target(&self.#access))
            }
        })
        .collect();

    let bindings_fn = if bindings.is_empty() {
        quote! {}
    } else {
        quote! {
            fn bindings(&self) -> ::std::vec::Vec<::layerkit::Binding> {
                ::std::vec![#(#bindings),*]
            }
        }
    };

    Ok(quote! {
        impl ::layerkit::Described for #name {
            fn describe() -> &'static ::layerkit::ComponentDescriptor {
                static DESCRIPTOR: ::std::sync::LazyLock<::layerkit::ComponentDescriptor> =
                    ::std::sync::LazyLock::new(|| {
                        ::layerkit::ComponentDescriptor::new(::std::any::type_name::<#name>())
                            #(.with_role(#roles))*
                            #(#field_descriptors)*
                            #(.with_operation(#operations))*
                    });
                &DESCRIPTOR
            }
        }

        impl ::layerkit::Component for #name {
            fn descriptor(&self) -> &'static ::layerkit::ComponentDescriptor {
                <Self as ::layerkit::Described>::describe()
            }

            #bindings_fn
        }
    })
}
