pub const CART_GRAPHQL_FIELDS: &str = "#
id
cartType
selectedPaymentMethod {
    code
    title
    purchaseOrderNumber
    extraFields {
        name
        value
    }
}
availablePaymentMethods {
    code
    title
}
createdAt
lastModified
#";

pub const SET_PAYMENT_METHOD_MUTATION: &str = r#"
    mutation setPaymentMethodOnCart($input: SetPaymentMethodOnCartInput!) {
        setPaymentMethodOnCart(input: $input) {
            cart {
                id
                cartType
                selectedPaymentMethod {
                    code
                    title
                    purchaseOrderNumber
                    extraFields {
                        name
                        value
                    }
                }
            }
        }
    }
"#;

pub const CREATE_EMPTY_CART_MUTATION: &str = r#"
    mutation createEmptyCart {
        createEmptyCart
    }
"#;
