/// Declare a model struct together with its [`Table`](crate::Table) impl.
///
/// Every field maps to exactly one column. The generated accessors dispatch on
/// the column name at a given index of `COLUMNS`, so no runtime reflection is
/// involved. The key fields also get typed `find` and `exists` helpers.
///
/// ```ignore
/// model! {
///     /// A kind of source: book, article, letter.
///     pub struct SourceType in "source_types" {
///         id: i64 = "id",
///         name: String = "name",
///     }
///     key(id: i64 = "id");
///     defaults["id"];
///     no_defaults["name"];
/// }
/// ```
#[macro_export]
macro_rules! model {
    (
        $(#[$meta:meta])*
        pub struct $name:ident in $table:literal {
            $( $(#[$field_meta:meta])* $field:ident : $ty:ty = $column:literal ),+ $(,)?
        }
        key( $( $key:ident : $key_ty:ty = $key_column:literal ),+ );
        defaults[ $( $default:literal ),* $(,)? ];
        no_defaults[ $( $no_default:literal ),* $(,)? ];
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $name {
            $( $(#[$field_meta])* pub $field: $ty, )+
        }

        impl $crate::table::Table for $name {
            const NAME: &'static str = $table;
            const COLUMNS: &'static [&'static str] = &[$($column),+];
            const COLUMNS_WITH_DEFAULT: &'static [&'static str] = &[$($default),*];
            const COLUMNS_WITHOUT_DEFAULT: &'static [&'static str] = &[$($no_default),*];
            const PRIMARY_KEY: &'static [&'static str] = &[$($key_column),+];

            fn value_at(&self, index: usize) -> Option<$crate::value::SqlValue> {
                match <Self as $crate::table::Table>::COLUMNS.get(index).copied()? {
                    $( $column => Some($crate::value::SqlValue::from(self.$field.clone())), )+
                    _ => None,
                }
            }

            fn set_value_at(
                &mut self,
                index: usize,
                value: $crate::value::SqlValue,
            ) -> $crate::error::Result<()> {
                match <Self as $crate::table::Table>::COLUMNS.get(index).copied() {
                    $( Some($column) => {
                        self.$field = $crate::table::convert::<Self, _>(index, value)?;
                    } )+
                    _ => return Err($crate::table::column_out_of_range::<Self>(index)),
                }
                Ok(())
            }

            fn scan_at(
                &mut self,
                index: usize,
                row: &$crate::Row,
                position: usize,
            ) -> $crate::error::Result<()> {
                match <Self as $crate::table::Table>::COLUMNS.get(index).copied() {
                    $( Some($column) => {
                        self.$field = $crate::table::decode::<Self, _>(row, index, position)?;
                    } )+
                    _ => return Err($crate::table::column_out_of_range::<Self>(index)),
                }
                Ok(())
            }
        }

        impl $name {
            /// Fetch the row with this primary key.
            pub fn find<E>(
                models: &$crate::crud::Models,
                exec: &E,
                $( $key: $key_ty, )+
            ) -> $crate::error::Result<Self>
            where
                E: $crate::executor::Executor + ?Sized,
            {
                models.find::<Self, E>(exec, &[$($crate::value::SqlValue::from($key)),+], &[])
            }

            pub fn exists<E>(
                models: &$crate::crud::Models,
                exec: &E,
                $( $key: $key_ty, )+
            ) -> $crate::error::Result<bool>
            where
                E: $crate::executor::Executor + ?Sized,
            {
                models.exists::<Self, E>(exec, &[$($crate::value::SqlValue::from($key)),+])
            }
        }
    };
}
