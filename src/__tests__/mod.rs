mod tokenization_test;
