use darling::FromDeriveInput;
use darling::FromField;
use proc_macro2::Ident;
use proc_macro2::TokenStream as TokenStream2;
use quote::format_ident;
use quote::quote;
use syn::DeriveInput;
use syn::Type;

#[derive(Debug, FromField)]
#[darling(attributes(rosterql))]
struct FieldReceiver {
    pub ident: Option<Ident>,
    pub ty:    Type,

    #[darling(default)]
    pub primary_key: bool,

    #[darling(default)]
    pub auto_increment: bool,

    #[darling(default)]
    pub column_name: Option<String>,

    #[darling(default)]
    pub references: Option<String>,
}

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(rosterql), supports(struct_named))]
struct EntityReceiver {
    pub ident: Ident,
    pub data:  darling::ast::Data<(), FieldReceiver>,

    #[darling(default)]
    pub table_name: Option<String>,
}

#[derive(Debug)]
struct FieldInfo {
    pub field_name:        Ident,
    pub variant_name:      Ident,
    pub column_name:       String,
    pub field_type:        Type,
    pub is_primary_key:    bool,
    pub is_optional:       bool,
    pub is_auto_increment: bool,
    pub references:        Option<(String, String)>,
}

#[derive(Debug)]
struct EntityInfo {
    pub struct_name: Ident,
    pub table_name:  String,
    pub fields:      Vec<FieldInfo>,
}

impl FieldReceiver {
    fn to_field_info(self) -> FieldInfo {
        let field_name = self.ident.expect("Expected named field");
        let is_optional = is_option_type(&self.ty);
        let variant_name = to_pascal_case(&field_name);
        let column_name = self.column_name.unwrap_or_else(|| field_name.to_string());
        let references = self.references.map(parse_references);

        FieldInfo {
            field_name,
            variant_name,
            column_name,
            field_type: self.ty,
            is_primary_key: self.primary_key,
            is_optional,
            is_auto_increment: self.auto_increment,
            references,
        }
    }
}

impl EntityReceiver {
    fn to_entity_info(self) -> EntityInfo {
        let table_name = self.table_name.unwrap_or_else(|| to_snake_case(&self.ident));

        let fields =
            self.data.take_struct().expect("Expected struct").fields.into_iter().map(|f| f.to_field_info()).collect();

        EntityInfo { struct_name: self.ident, table_name, fields }
    }
}

#[proc_macro_derive(Entity, attributes(rosterql))]
pub fn derive_entity(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    let receiver = match EntityReceiver::from_derive_input(&input) {
        Ok(r) => r,
        Err(e) => return e.write_errors().into(),
    };

    let entity_info = receiver.to_entity_info();

    let expanded = impl_entity(&entity_info);
    proc_macro::TokenStream::from(expanded)
}

fn impl_entity(entity_info: &EntityInfo) -> TokenStream2 {
    let name = &entity_info.struct_name;
    let entity_name = format_ident!("{}Entity", name);
    let column_enum_name = format_ident!("{}Column", name);
    let active_model_name = format_ident!("{}ActiveModel", name);

    let table_name = entity_info.table_name.clone();

    let column_variants: Vec<_> = entity_info
        .fields
        .iter()
        .map(|f| {
            let variant_name = &f.variant_name;
            quote! { #variant_name }
        })
        .collect();

    let column_name_arms: Vec<_> = entity_info
        .fields
        .iter()
        .map(|f| {
            let variant_name = &f.variant_name;
            let col_name = &f.column_name;
            quote! { Self::#variant_name => #col_name }
        })
        .collect();

    let column_type_arms: Vec<_> = entity_info
        .fields
        .iter()
        .map(|f| {
            let variant_name = &f.variant_name;
            let col_type = rust_type_to_column_type(&f.field_type, f.is_optional);
            quote! { Self::#variant_name => #col_type }
        })
        .collect();

    let is_nullable_arms: Vec<_> = entity_info
        .fields
        .iter()
        .map(|f| {
            let variant_name = &f.variant_name;
            let is_nullable = f.is_optional;
            quote! { Self::#variant_name => #is_nullable }
        })
        .collect();

    let is_primary_key_arms: Vec<_> = entity_info
        .fields
        .iter()
        .map(|f| {
            let variant_name = &f.variant_name;
            let is_pk = f.is_primary_key;
            quote! { Self::#variant_name => #is_pk }
        })
        .collect();

    let is_auto_increment_arms: Vec<_> = entity_info
        .fields
        .iter()
        .map(|f| {
            let variant_name = &f.variant_name;
            let is_auto = f.is_auto_increment;
            quote! { Self::#variant_name => #is_auto }
        })
        .collect();

    let references_arms: Vec<_> = entity_info
        .fields
        .iter()
        .map(|f| {
            let variant_name = &f.variant_name;
            match &f.references {
                Some((table, column)) => quote! { Self::#variant_name => Some((#table, #column)) },
                None => quote! { Self::#variant_name => None },
            }
        })
        .collect();

    let primary_key_fields = entity_info.fields.iter().filter(|f| f.is_primary_key).collect::<Vec<_>>();

    if primary_key_fields.is_empty() {
        panic!("Entity must have a primary key field marked with #[rosterql(primary_key)]");
    } else if primary_key_fields.len() > 1 {
        panic!("Entity must have only one primary key field marked with #[rosterql(primary_key)]");
    }

    let primary_key_field = primary_key_fields[0];
    let pk_variant = &primary_key_field.variant_name;
    let pk_field_name = &primary_key_field.field_name;
    let pk_column_name = &primary_key_field.column_name;
    let pk_is_auto_increment = primary_key_field.is_auto_increment;

    let from_row_fields: Vec<_> = entity_info
        .fields
        .iter()
        .enumerate()
        .map(|(idx, f)| {
            let field_name = &f.field_name;
            if f.is_optional {
                quote! {
                    #field_name: rosterql::FromValue::from_value_opt(row.get_value(#idx)?)?
                }
            } else {
                quote! {
                    #field_name: rosterql::FromValue::from_value(row.get_value(#idx)?)?
                }
            }
        })
        .collect();

    let active_model_fields: Vec<_> = entity_info
        .fields
        .iter()
        .map(|f| {
            let field_name = &f.field_name;
            let field_type = &f.field_type;
            quote! {
                pub #field_name: rosterql::ActiveValue<#field_type>
            }
        })
        .collect();

    let active_model_from_model_fields: Vec<_> = entity_info
        .fields
        .iter()
        .map(|f| {
            let field_name = &f.field_name;
            quote! {
                #field_name: rosterql::ActiveValue::Set(model.#field_name.clone())
            }
        })
        .collect();

    let insert_set_arms: Vec<_> = entity_info
        .fields
        .iter()
        .map(|f| {
            let field_name = &f.field_name;
            let col_name = &f.column_name;
            quote! {
                if let rosterql::ActiveValue::Set(ref v) = self.#field_name {
                    columns.push(#col_name);
                    values.push(rosterql::IntoValue::into_value(v.clone()));
                }
            }
        })
        .collect();

    let update_set_arms: Vec<_> = entity_info
        .fields
        .iter()
        .filter(|f| !f.is_primary_key)
        .map(|f| {
            let field_name = &f.field_name;
            let col_name = &f.column_name;
            quote! {
                if let rosterql::ActiveValue::Set(ref v) = self.#field_name {
                    sets.push((#col_name, rosterql::IntoValue::into_value(v.clone())));
                }
            }
        })
        .collect();

    let all_columns: Vec<_> = entity_info.fields.iter().map(|f| f.column_name.as_str()).collect();
    let all_columns_str = all_columns.join(", ");
    let qualified_columns_str = all_columns
        .iter()
        .map(|c| format!("{}.{}", entity_info.table_name, c))
        .collect::<Vec<_>>()
        .join(", ");

    let column_count = entity_info.fields.len();

    quote! {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum #column_enum_name {
            #(#column_variants),*
        }

        impl rosterql::ColumnTrait for #column_enum_name {
            fn name(&self) -> &'static str {
                match self {
                    #(#column_name_arms),*
                }
            }

            fn table_name(&self) -> &'static str {
                #table_name
            }

            fn column_type(&self) -> rosterql::ColumnType {
                match self {
                    #(#column_type_arms),*
                }
            }

            fn is_nullable(&self) -> bool {
                match self {
                    #(#is_nullable_arms),*
                }
            }

            fn is_primary_key(&self) -> bool {
                match self {
                    #(#is_primary_key_arms),*
                }
            }

            fn is_auto_increment(&self) -> bool {
                match self {
                    #(#is_auto_increment_arms),*
                }
            }

            fn references(&self) -> Option<(&'static str, &'static str)> {
                match self {
                    #(#references_arms),*
                }
            }

            fn all() -> &'static [Self] {
                &[#(Self::#column_variants),*]
            }
        }

        impl std::fmt::Display for #column_enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", rosterql::ColumnTrait::name(self))
            }
        }

        #[derive(Clone, Copy, Debug, Default)]
        pub struct #entity_name;

        impl rosterql::EntityTrait for #entity_name {
            type Model = #name;
            type Column = #column_enum_name;
            type ActiveModel = #active_model_name;

            fn table_name() -> &'static str {
                #table_name
            }

            fn primary_key() -> Self::Column {
                #column_enum_name::#pk_variant
            }

            fn primary_key_auto_increment() -> bool {
                #pk_is_auto_increment
            }

            fn all_columns() -> &'static str {
                #all_columns_str
            }

            fn qualified_columns() -> &'static str {
                #qualified_columns_str
            }

            fn column_count() -> usize {
                #column_count
            }
        }

        impl #entity_name {
            pub fn active_model() -> #active_model_name {
                #active_model_name::default()
            }
        }

        impl rosterql::FromRow for #name {
            fn from_row(row: &rosterql::Row) -> rosterql::Result<Self> {
                Ok(Self {
                    #(#from_row_fields),*
                })
            }
        }

        impl rosterql::ModelTrait for #name {
            type Entity = #entity_name;

            fn get_primary_key_value(&self) -> rosterql::Value {
                rosterql::IntoValue::into_value(self.#pk_field_name.clone())
            }
        }

        #[derive(Clone, Debug, Default)]
        pub struct #active_model_name {
            #(#active_model_fields),*
        }

        impl rosterql::ActiveModelTrait for #active_model_name {
            type Entity = #entity_name;

            fn get_insert_columns_and_values(&self) -> (Vec<&'static str>, Vec<rosterql::Value>) {
                let mut columns = Vec::new();
                let mut values = Vec::new();
                #(#insert_set_arms)*
                (columns, values)
            }

            fn get_update_sets(&self) -> Vec<(&'static str, rosterql::Value)> {
                let mut sets = Vec::new();
                #(#update_set_arms)*
                sets
            }

            fn get_primary_key_value(&self) -> Option<rosterql::Value> {
                match &self.#pk_field_name {
                    rosterql::ActiveValue::Set(v) => Some(rosterql::IntoValue::into_value(v.clone())),
                    rosterql::ActiveValue::NotSet => None,
                }
            }

            fn primary_key_column() -> &'static str {
                #pk_column_name
            }
        }

        impl From<#name> for #active_model_name {
            fn from(model: #name) -> Self {
                Self {
                    #(#active_model_from_model_fields),*
                }
            }
        }
    }
}

fn rust_type_to_column_type(ty: &Type, is_optional: bool) -> TokenStream2 {
    let inner_type = if is_optional { extract_option_inner_type(ty).unwrap_or(ty) } else { ty };

    match inner_type {
        Type::Path(type_path) => {
            let segment = type_path.path.segments.last().unwrap();
            let type_name = segment.ident.to_string();
            match type_name.as_str() {
                "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" => {
                    quote! { rosterql::ColumnType::Integer }
                }
                "f32" | "f64" => quote! { rosterql::ColumnType::Float },
                "bool" => quote! { rosterql::ColumnType::Integer },
                "Vec" => quote! { rosterql::ColumnType::Blob },
                _ => quote! { rosterql::ColumnType::Text },
            }
        }
        _ => quote! { rosterql::ColumnType::Text },
    }
}

fn extract_option_inner_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if segment.ident == "Option" {
                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                        return Some(inner);
                    }
                }
            }
        }
    }
    None
}

fn is_option_type(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            return segment.ident == "Option";
        }
    }
    false
}

fn to_pascal_case(ident: &Ident) -> Ident {
    let s = ident.to_string();
    let pascal: String = s
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    Ident::new(&pascal, ident.span())
}

fn to_snake_case(ident: &Ident) -> String {
    let s = ident.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.push(c.to_lowercase().next().unwrap());
    }
    result
}

fn parse_references(refs: String) -> (String, String) {
    let parts: Vec<&str> = refs.splitn(2, '.').collect();
    match parts.as_slice() {
        [table, column] => (table.to_string(), column.to_string()),
        [table] => (table.to_string(), "id".to_string()),
        _ => panic!("Invalid references format: {}", refs),
    }
}
